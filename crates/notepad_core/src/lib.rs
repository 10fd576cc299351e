//! Core domain logic for the notepad panel.
//!
//! Owns rich-text note tabs, their additive character styling and the flat
//! encodings used to persist both across sessions. Host UI chrome, dialogs
//! and preference pages live outside this crate.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod style;

pub use config::{Alignment, NotepadPreferences, PreferenceError, RgbColor, TabAppearance};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::session::{SessionEntry, SessionMemento};
pub use model::style::{AttributeSet, StyleAttribute, StyleInterval};
pub use model::tab::{NoteTab, Selection, TabId};
pub use repo::session_repo::{RepoError, RepoResult, SessionRepository, SqliteSessionRepository};
pub use service::export::{export_note_text, ExportError, ExportOutcome};
pub use service::notepad_view::NotepadView;
pub use service::tab_store::{NoteTabStore, StoreError, StoreResult};
pub use style::{StyleError, StyleRangeEngine, StyleResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
