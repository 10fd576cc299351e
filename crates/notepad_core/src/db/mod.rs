//! Session memento store on SQLite.
//!
//! # Responsibility
//! - Open the session database and bring `session_memento` to the current shape.
//! - Reject databases whose memento table cannot hold the flat key/value snapshot.
//!
//! # Invariants
//! - Schema revision is tracked via `PRAGMA user_version`.
//! - `session_memento` has `key` (primary key), `value` and `saved_at` columns
//!   before any connection is handed out.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding one row per memento key.
pub const SESSION_TABLE: &str = "session_memento";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a build with a newer memento layout.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// `session_memento` exists but lacks a column the repository reads or writes.
    SessionTableMissingColumn { column: &'static str },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "session database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SessionTableMissingColumn { column } => {
                write!(f, "{SESSION_TABLE} table has no `{column}` column")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::SessionTableMissingColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
