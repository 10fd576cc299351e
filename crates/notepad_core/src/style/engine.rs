//! Per-buffer style interval set with additive merge semantics.

use super::codec::{decode_style_blob, encode_style_blob};
use super::StyleResult;
use crate::model::style::{AttributeSet, StyleAttribute, StyleInterval};

/// Styled intervals of one text buffer.
///
/// Unstyled text is implicit: clearing a range removes its intervals rather
/// than storing an empty-attribute run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRangeEngine {
    intervals: Vec<StyleInterval>,
}

impl StyleRangeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored intervals in start order.
    pub fn intervals(&self) -> &[StyleInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns intervals overlapping `[start, start + length)`, clipped to it.
    ///
    /// Unstyled gaps inside the range have no entry.
    pub fn query_styles_intersecting(&self, start: usize, length: usize) -> Vec<StyleInterval> {
        let end = start.saturating_add(length);
        self.intervals
            .iter()
            .filter(|interval| interval.overlaps(start, end))
            .map(|interval| {
                let clipped_start = interval.start.max(start);
                let clipped_end = interval.end().min(end);
                StyleInterval::new(
                    clipped_start,
                    clipped_end - clipped_start,
                    interval.attributes,
                )
            })
            .collect()
    }

    /// Attributes carried by the character at `offset`.
    pub fn attributes_at(&self, offset: usize) -> AttributeSet {
        self.intervals
            .iter()
            .find(|interval| interval.start <= offset && offset < interval.end())
            .map_or(AttributeSet::EMPTY, |interval| interval.attributes)
    }

    /// Adds `attribute` to every character of the range, keeping whatever
    /// other attributes each character already had.
    ///
    /// A zero-length range, or one whose end does not fit in `usize`, leaves
    /// the set unchanged.
    pub fn apply_style(&mut self, start: usize, length: usize, attribute: StyleAttribute) {
        if length == 0 || start.checked_add(length).is_none() {
            return;
        }

        let preserved = self.query_styles_intersecting(start, length);
        self.set_range(start, length, AttributeSet::only(attribute));
        for interval in preserved {
            self.set_range(
                interval.start,
                interval.length,
                interval.attributes.with(attribute),
            );
        }
    }

    /// Underlines the range; see `apply_style`.
    pub fn apply_underline(&mut self, start: usize, length: usize) {
        self.apply_style(start, length, StyleAttribute::Underline);
    }

    /// Removes every attribute from the range. Prior styles are not kept.
    ///
    /// A range whose end does not fit in `usize` is ignored.
    pub fn clear_styles(&mut self, start: usize, length: usize) {
        self.set_range(start, length, AttributeSet::EMPTY);
    }

    /// Drops every interval.
    pub fn clear_all(&mut self) {
        self.intervals.clear();
    }

    /// Flat-string encoding of the current set.
    pub fn serialize(&self) -> String {
        encode_style_blob(&self.intervals)
    }

    /// Replaces the whole set with the decoded blob.
    ///
    /// On error the current set is left untouched.
    pub fn deserialize(&mut self, blob: &str) -> StyleResult<()> {
        let decoded = decode_style_blob(blob)?;
        self.intervals.clear();
        for interval in decoded {
            self.set_range(interval.start, interval.length, interval.attributes);
        }
        Ok(())
    }

    /// Destructively sets the attributes of `[start, start + length)`.
    ///
    /// Overlapped intervals are split so that only their parts outside the
    /// range survive; neighbours with equal attributes are coalesced. Empty
    /// ranges and ranges whose end overflows are ignored.
    fn set_range(&mut self, start: usize, length: usize, attributes: AttributeSet) {
        let Some(end) = start.checked_add(length) else {
            return;
        };
        if length == 0 {
            return;
        }

        let replacement = StyleInterval::new(start, length, attributes);
        let mut next = Vec::with_capacity(self.intervals.len() + 2);
        let mut inserted = false;

        for interval in std::mem::take(&mut self.intervals) {
            if interval.end() <= start {
                next.push(interval);
                continue;
            }
            if interval.start >= end {
                if !inserted {
                    push_styled(&mut next, replacement);
                    inserted = true;
                }
                next.push(interval);
                continue;
            }

            if interval.start < start {
                next.push(StyleInterval::new(
                    interval.start,
                    start - interval.start,
                    interval.attributes,
                ));
            }
            if !inserted {
                push_styled(&mut next, replacement);
                inserted = true;
            }
            if interval.end() > end {
                next.push(StyleInterval::new(
                    end,
                    interval.end() - end,
                    interval.attributes,
                ));
            }
        }
        if !inserted {
            push_styled(&mut next, replacement);
        }

        self.intervals = coalesce(next);
    }
}

fn push_styled(target: &mut Vec<StyleInterval>, interval: StyleInterval) {
    if !interval.attributes.is_empty() {
        target.push(interval);
    }
}

fn coalesce(intervals: Vec<StyleInterval>) -> Vec<StyleInterval> {
    let mut merged: Vec<StyleInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if last.end() == interval.start && last.attributes == interval.attributes {
                last.length += interval.length;
                continue;
            }
        }
        merged.push(interval);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::StyleRangeEngine;
    use crate::model::style::{AttributeSet, StyleAttribute, StyleInterval};

    fn bold() -> AttributeSet {
        AttributeSet::only(StyleAttribute::Bold)
    }

    fn italic() -> AttributeSet {
        AttributeSet::only(StyleAttribute::Italic)
    }

    #[test]
    fn bold_then_overlapping_italic_unions_attributes() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 10, StyleAttribute::Bold);
        engine.apply_style(5, 10, StyleAttribute::Italic);

        assert_eq!(
            engine.intervals(),
            &[
                StyleInterval::new(0, 5, bold()),
                StyleInterval::new(5, 5, bold().union(italic())),
                StyleInterval::new(10, 5, italic()),
            ]
        );
    }

    #[test]
    fn applying_same_attribute_twice_is_idempotent() {
        let mut once = StyleRangeEngine::new();
        once.apply_style(3, 4, StyleAttribute::Italic);
        once.apply_underline(0, 5);

        let mut twice = once.clone();
        twice.apply_underline(0, 5);

        assert_eq!(once, twice);
    }

    #[test]
    fn zero_length_apply_is_noop() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 4, StyleAttribute::Bold);
        let before = engine.clone();

        engine.apply_style(2, 0, StyleAttribute::Italic);
        engine.apply_underline(7, 0);
        engine.clear_styles(1, 0);

        assert_eq!(engine, before);
    }

    #[test]
    fn clear_removes_everything_inside_range_only() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 10, StyleAttribute::Bold);
        engine.apply_underline(0, 10);
        engine.clear_styles(2, 3);

        assert!(engine.query_styles_intersecting(2, 3).is_empty());
        assert_eq!(engine.attributes_at(2), AttributeSet::EMPTY);
        let kept = bold().with(StyleAttribute::Underline);
        assert_eq!(
            engine.intervals(),
            &[StyleInterval::new(0, 2, kept), StyleInterval::new(5, 5, kept)]
        );
    }

    #[test]
    fn query_clips_to_requested_range() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 10, StyleAttribute::Bold);

        let hits = engine.query_styles_intersecting(8, 5);
        assert_eq!(hits, vec![StyleInterval::new(8, 2, bold())]);
    }

    #[test]
    fn apply_inside_existing_run_splits_it() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 9, StyleAttribute::Italic);
        engine.apply_style(3, 3, StyleAttribute::Bold);

        assert_eq!(
            engine.intervals(),
            &[
                StyleInterval::new(0, 3, italic()),
                StyleInterval::new(3, 3, italic().union(bold())),
                StyleInterval::new(6, 3, italic()),
            ]
        );
    }

    #[test]
    fn adjacent_equal_runs_are_coalesced() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 3, StyleAttribute::Bold);
        engine.apply_style(3, 3, StyleAttribute::Bold);
        engine.apply_style(8, 2, StyleAttribute::Bold);

        assert_eq!(
            engine.intervals(),
            &[
                StyleInterval::new(0, 6, bold()),
                StyleInterval::new(8, 2, bold()),
            ]
        );
    }

    #[test]
    fn serialize_round_trips_engine_output() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 10, StyleAttribute::Bold);
        engine.apply_style(5, 10, StyleAttribute::Italic);
        engine.apply_underline(12, 6);
        engine.clear_styles(1, 2);

        let blob = engine.serialize();
        let mut restored = StyleRangeEngine::new();
        restored.deserialize(&blob).unwrap();

        assert_eq!(restored, engine);
        assert_eq!(restored.serialize(), blob);
    }

    #[test]
    fn failed_deserialize_keeps_previous_set() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 4, StyleAttribute::Bold);
        let before = engine.clone();

        assert!(engine.deserialize("1,2,x,0,").is_err());
        assert_eq!(engine, before);
    }

    #[test]
    fn deserialize_overwrites_instead_of_merging() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 4, StyleAttribute::Bold);

        engine.deserialize("10,2,2,0,").unwrap();
        assert_eq!(engine.intervals(), &[StyleInterval::new(10, 2, italic())]);

        engine.deserialize("").unwrap();
        assert!(engine.is_empty());
    }

    #[test]
    fn overflowing_range_is_ignored() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(2, 3, StyleAttribute::Italic);
        let before = engine.clone();

        engine.apply_style(usize::MAX, 3, StyleAttribute::Bold);
        engine.apply_underline(usize::MAX - 1, 2);
        engine.clear_styles(usize::MAX, 1);

        assert_eq!(engine, before);
        assert!(engine.intervals().iter().all(|interval| interval.length > 0));
    }

    #[test]
    fn overflowing_blob_group_is_rejected() {
        let mut engine = StyleRangeEngine::new();
        engine.apply_style(0, 2, StyleAttribute::Bold);
        let before = engine.clone();

        assert!(engine.deserialize("18446744073709551615,5,1,0,").is_err());
        assert_eq!(engine, before);
    }
}
