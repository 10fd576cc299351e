//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate tab, style and persistence calls into host-level commands.
//! - Keep UI layers decoupled from storage details.

pub mod export;
pub mod notepad_view;
pub mod tab_store;
