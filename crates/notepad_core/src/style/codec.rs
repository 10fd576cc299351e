//! Flat-string encoding of style intervals.
//!
//! Each interval is written as `start,length,fontStyle,underline,`; the
//! groups are concatenated in interval order. The empty string encodes an
//! empty set.

use super::{StyleError, StyleResult};
use crate::model::style::{AttributeSet, StyleInterval};
use std::fmt::Write;

const SEPARATOR: char = ',';
const FIELDS_PER_INTERVAL: usize = 4;

/// Encodes intervals in the given order.
pub fn encode_style_blob(intervals: &[StyleInterval]) -> String {
    let mut blob = String::with_capacity(intervals.len() * 12);
    for interval in intervals {
        // Writing into a String cannot fail.
        let _ = write!(
            blob,
            "{start}{SEPARATOR}{length}{SEPARATOR}{font}{SEPARATOR}{underline}{SEPARATOR}",
            start = interval.start,
            length = interval.length,
            font = interval.attributes.font_style(),
            underline = u8::from(interval.attributes.is_underlined()),
        );
    }
    blob
}

/// Decodes a blob produced by `encode_style_blob`.
///
/// The trailing separator is optional. Zero-length groups are returned as-is;
/// the engine drops them when applying.
///
/// # Errors
/// - `MalformedStyleData` when the field count is not a multiple of four.
/// - `MalformedStyleData` when any field is empty or not a non-negative integer.
/// - `MalformedStyleData` when `start + length` does not fit in `usize`.
pub fn decode_style_blob(blob: &str) -> StyleResult<Vec<StyleInterval>> {
    if blob.is_empty() {
        return Ok(Vec::new());
    }

    let body = blob.strip_suffix(SEPARATOR).unwrap_or(blob);
    let fields: Vec<&str> = body.split(SEPARATOR).collect();
    if fields.len() % FIELDS_PER_INTERVAL != 0 {
        return Err(StyleError::MalformedStyleData(format!(
            "field count {} is not a multiple of {FIELDS_PER_INTERVAL}",
            fields.len()
        )));
    }

    fields
        .chunks_exact(FIELDS_PER_INTERVAL)
        .enumerate()
        .map(|(group, chunk)| -> StyleResult<StyleInterval> {
            let field =
                |offset: usize| parse_field(chunk[offset], group * FIELDS_PER_INTERVAL + offset);
            let start = field(0)?;
            let length = field(1)?;
            if start.checked_add(length).is_none() {
                return Err(StyleError::MalformedStyleData(format!(
                    "interval {group} end overflows: start {start} + length {length}"
                )));
            }
            let font_style = u32::try_from(field(2)?).map_err(|_| {
                StyleError::MalformedStyleData(format!(
                    "font style `{}` is out of range",
                    chunk[2]
                ))
            })?;
            let underline = field(3)? == 1;
            Ok(StyleInterval::new(
                start,
                length,
                AttributeSet::from_encoded(font_style, underline),
            ))
        })
        .collect()
}

fn parse_field(raw: &str, index: usize) -> StyleResult<usize> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(StyleError::MalformedStyleData(format!(
            "field {index} `{raw}` is not a non-negative integer"
        )));
    }
    raw.parse::<usize>().map_err(|err| {
        StyleError::MalformedStyleData(format!("field {index} `{raw}` cannot be parsed: {err}"))
    })
}
