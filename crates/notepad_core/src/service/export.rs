//! Plain-text export of one note.
//!
//! # Responsibility
//! - Write a tab's raw text to a file chosen by the host.
//!
//! # Invariants
//! - Output is the text as-is: UTF-8, no header, no formatting.
//! - An existing file is only replaced when the caller confirmed overwrite.
//! - Failures are reported once; nothing is retried or rolled back.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of an export request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { bytes: usize },
    /// No path was chosen, or the file exists and overwrite was declined.
    Skipped,
}

#[derive(Debug)]
pub enum ExportError {
    Io { path: PathBuf, source: io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to save note to `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Writes `text` to `path`.
///
/// # Errors
/// - `Io` when the file cannot be created or written.
pub fn export_note_text(
    path: impl AsRef<Path>,
    text: &str,
    overwrite: bool,
) -> Result<ExportOutcome, ExportError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(ExportOutcome::Skipped);
    }
    if path.exists() && !overwrite {
        info!("event=note_export module=export status=skipped reason=exists");
        return Ok(ExportOutcome::Skipped);
    }

    let started_at = Instant::now();
    match std::fs::write(path, text) {
        Ok(()) => {
            info!(
                "event=note_export module=export status=ok bytes={} duration_ms={}",
                text.len(),
                started_at.elapsed().as_millis()
            );
            Ok(ExportOutcome::Written { bytes: text.len() })
        }
        Err(source) => {
            error!(
                "event=note_export module=export status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                source
            );
            Err(ExportError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
