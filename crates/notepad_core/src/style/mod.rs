//! Style range engine and its flat-string codec.
//!
//! # Responsibility
//! - Maintain one buffer's styled intervals with additive merge semantics.
//! - Encode/decode interval sets to the persisted comma-separated blob.
//!
//! # Invariants
//! - Stored intervals are sorted, non-overlapping and non-empty.
//! - Adjacent intervals never carry identical attributes.
//! - `decode(encode(x)) == x` for every engine-produced interval set.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod engine;

pub use codec::{decode_style_blob, encode_style_blob};
pub use engine::StyleRangeEngine;

pub type StyleResult<T> = Result<T, StyleError>;

/// Style parsing and bounds errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Blob field count is not a multiple of four, or a field is not a
    /// non-negative integer.
    MalformedStyleData(String),
    /// Range falls outside the current text snapshot.
    OutOfRange {
        start: usize,
        length: usize,
        text_len: usize,
    },
}

impl Display for StyleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedStyleData(details) => write!(f, "malformed style data: {details}"),
            Self::OutOfRange {
                start,
                length,
                text_len,
            } => write!(
                f,
                "style range {start}+{length} exceeds text length {text_len}"
            ),
        }
    }
}

impl Error for StyleError {}
