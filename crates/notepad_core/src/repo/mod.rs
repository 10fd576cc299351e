//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the session persistence contract used by the view.
//! - Isolate SQLite query details from service orchestration.

pub mod session_repo;
