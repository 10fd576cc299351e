//! Schema steps for the session memento table.
//!
//! # Responsibility
//! - List the memento layout revisions in order.
//! - Upgrade older files in one transaction without losing stored keys.
//! - Check the resulting table against the columns the repository needs.
//!
//! # Invariants
//! - Step versions strictly increase; the last one equals `PRAGMA user_version`
//!   of a fully upgraded file.
//! - Upgrades only add columns; existing `(key, value)` rows are kept.

use crate::db::{DbError, DbResult, SESSION_TABLE};
use log::{debug, info};
use rusqlite::Connection;

/// Columns `SqliteSessionRepository` depends on.
pub const SESSION_COLUMNS: [&str; 3] = ["key", "value", "saved_at"];

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "session_memento",
        sql: include_str!("0001_session_memento.sql"),
    },
    SchemaStep {
        version: 2,
        name: "session_memento_saved_at",
        sql: include_str!("0002_session_memento_saved_at.sql"),
    },
];

/// Memento layout revision this build writes.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Upgrades the memento table to `latest_version` and verifies its columns.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file comes from a newer build.
/// - `Sqlite` when a step fails; the file keeps its previous revision.
/// - `SessionTableMissingColumn` when the table lacks a required column.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    if current < latest {
        let tx = conn.transaction()?;
        for step in STEPS.iter().filter(|step| step.version > current) {
            tx.execute_batch(step.sql)?;
            tx.pragma_update(None, "user_version", step.version)?;
            debug!(
                "event=db_migrate module=db status=step version={} name={}",
                step.version, step.name
            );
        }
        tx.commit()?;
        info!("event=db_migrate module=db status=ok from={current} to={latest}");
    }

    verify_session_table(conn)
}

fn verify_session_table(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({SESSION_TABLE});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    match SESSION_COLUMNS
        .into_iter()
        .find(|column| !present.iter().any(|name| name.as_str() == *column))
    {
        Some(column) => Err(DbError::SessionTableMissingColumn { column }),
        None => Ok(()),
    }
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
