//! Domain model for note tabs and their styling.
//!
//! # Responsibility
//! - Define character attributes and styled intervals.
//! - Define the note tab and its persisted session shape.
//!
//! # Invariants
//! - Style offsets are `char` offsets into the owning tab's current text.
//! - Session entries keep tab display order.

pub mod session;
pub mod style;
pub mod tab;
