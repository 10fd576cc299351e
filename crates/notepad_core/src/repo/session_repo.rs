//! Session memento repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the flat session memento between application runs.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save_memento` replaces the whole stored snapshot in one transaction.
//! - A never-saved store loads as an empty memento.
//! - Every row of one snapshot carries the same `saved_at` (unix millis).

use crate::db::DbError;
use crate::model::session::SessionMemento;
use log::{error, info};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for session persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage for the session memento.
pub trait SessionRepository {
    /// Loads the last saved memento, or an empty one.
    fn load_memento(&self) -> RepoResult<SessionMemento>;
    /// Replaces the stored memento.
    fn save_memento(&mut self, memento: &SessionMemento) -> RepoResult<()>;
}

/// SQLite-backed session repository.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// When the stored snapshot was written, or `None` if nothing was saved.
    ///
    /// Rows carried over from a pre-`saved_at` file report `0`.
    pub fn last_saved_at(&self) -> RepoResult<Option<i64>> {
        let saved_at = self.conn.query_row(
            "SELECT MAX(saved_at) FROM session_memento;",
            [],
            |row| row.get::<_, Option<i64>>(0),
        )?;
        Ok(saved_at)
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn load_memento(&self) -> RepoResult<SessionMemento> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM session_memento ORDER BY key ASC;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut values = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            values.insert(key, value);
        }
        Ok(SessionMemento::from_values(values))
    }

    fn save_memento(&mut self, memento: &SessionMemento) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = write_memento(self.conn, memento);
        match &result {
            Ok(()) => info!(
                "event=session_save module=repo status=ok keys={} duration_ms={}",
                memento.values().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=session_save module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn write_memento(conn: &mut Connection, memento: &SessionMemento) -> RepoResult<()> {
    let tx = conn.transaction()?;
    let saved_at: i64 =
        tx.query_row("SELECT CAST(strftime('%s','now') AS INTEGER) * 1000;", [], |row| {
            row.get(0)
        })?;
    tx.execute("DELETE FROM session_memento;", [])?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO session_memento (key, value, saved_at) VALUES (?1, ?2, ?3);",
        )?;
        for (key, value) in memento.values() {
            insert.execute(params![key, value, saved_at])?;
        }
    }
    tx.commit()?;
    Ok(())
}
