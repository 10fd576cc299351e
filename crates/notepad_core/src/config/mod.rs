//! User preferences driving note tab appearance and naming.
//!
//! # Responsibility
//! - Parse the host preference store's string values into a typed snapshot.
//! - Derive the per-tab appearance from that snapshot.
//!
//! # Invariants
//! - Parsing never fails as a whole; malformed values keep their defaults.
//! - Tabs only ever read an explicit snapshot, never ambient state.

pub mod preferences;

pub use preferences::{
    Alignment, NotepadPreferences, PreferenceError, RgbColor, TabAppearance,
};
