//! Note tab model.
//!
//! # Responsibility
//! - Own one tab's title, plain text, selection and style intervals.
//! - Route selection-based style commands to the tab's `StyleRangeEngine`.
//!
//! # Invariants
//! - Selection and every style interval lie within the current text.
//! - Replacing the text discards all style intervals and resets selection.

use crate::config::{NotepadPreferences, TabAppearance};
use crate::model::style::StyleAttribute;
use crate::style::{StyleError, StyleRangeEngine, StyleResult};
use uuid::Uuid;

/// Stable identity of a tab across reorders and renames.
pub type TabId = Uuid;

/// Selected character range, as reported by the host text widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
}

/// One note: title, plain text and its character styles.
#[derive(Debug, Clone)]
pub struct NoteTab {
    id: TabId,
    title: String,
    text: String,
    char_len: usize,
    selection: Selection,
    styles: StyleRangeEngine,
    appearance: TabAppearance,
}

impl NoteTab {
    /// Creates an unstyled tab rendered with the given preferences.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        prefs: &NotepadPreferences,
    ) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            char_len: text.chars().count(),
            text,
            selection: Selection::default(),
            styles: StyleRangeEngine::new(),
            appearance: TabAppearance::from_preferences(prefs),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text length in `char`s, the unit of all style offsets.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Replaces the text. Existing styles no longer match and are dropped.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.char_len = self.text.chars().count();
        self.selection = Selection::default();
        self.styles.clear_all();
    }

    pub fn clear_text(&mut self) {
        self.set_text(String::new());
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Records the host widget's selection.
    ///
    /// # Errors
    /// - `OutOfRange` when the range exceeds the current text.
    pub fn set_selection(&mut self, start: usize, length: usize) -> StyleResult<()> {
        self.check_bounds(start, length)?;
        self.selection = Selection { start, length };
        Ok(())
    }

    pub fn styles(&self) -> &StyleRangeEngine {
        &self.styles
    }

    pub fn bold_selection(&mut self) {
        self.style_selection(StyleAttribute::Bold);
    }

    pub fn italic_selection(&mut self) {
        self.style_selection(StyleAttribute::Italic);
    }

    pub fn underline_selection(&mut self) {
        let Selection { start, length } = self.selection;
        self.styles.apply_underline(start, length);
    }

    pub fn clear_selection_styles(&mut self) {
        let Selection { start, length } = self.selection;
        self.styles.clear_styles(start, length);
    }

    /// Adds `attribute` to an explicit range.
    ///
    /// # Errors
    /// - `OutOfRange` when the range exceeds the current text.
    pub fn apply_style(
        &mut self,
        start: usize,
        length: usize,
        attribute: StyleAttribute,
    ) -> StyleResult<()> {
        self.check_bounds(start, length)?;
        self.styles.apply_style(start, length, attribute);
        Ok(())
    }

    /// Removes all styles from an explicit range.
    ///
    /// # Errors
    /// - `OutOfRange` when the range exceeds the current text.
    pub fn clear_styles(&mut self, start: usize, length: usize) -> StyleResult<()> {
        self.check_bounds(start, length)?;
        self.styles.clear_styles(start, length);
        Ok(())
    }

    pub fn serialize_style(&self) -> String {
        self.styles.serialize()
    }

    /// Replaces the tab's styles with a persisted blob.
    ///
    /// Nothing changes when the blob is rejected.
    ///
    /// # Errors
    /// - `MalformedStyleData` when the blob cannot be decoded.
    /// - `OutOfRange` when a decoded interval ends past the text.
    pub fn restore_style(&mut self, blob: &str) -> StyleResult<()> {
        let mut restored = StyleRangeEngine::new();
        restored.deserialize(blob)?;
        if let Some(last) = restored.intervals().last() {
            if last.end() > self.char_len {
                return Err(StyleError::OutOfRange {
                    start: last.start,
                    length: last.length,
                    text_len: self.char_len,
                });
            }
        }
        self.styles = restored;
        Ok(())
    }

    pub fn appearance(&self) -> &TabAppearance {
        &self.appearance
    }

    /// Re-pulls appearance from a new preference snapshot.
    pub fn apply_preferences(&mut self, prefs: &NotepadPreferences) {
        self.appearance = TabAppearance::from_preferences(prefs);
    }

    fn style_selection(&mut self, attribute: StyleAttribute) {
        let Selection { start, length } = self.selection;
        self.styles.apply_style(start, length, attribute);
    }

    fn check_bounds(&self, start: usize, length: usize) -> StyleResult<()> {
        match start.checked_add(length) {
            Some(end) if end <= self.char_len => Ok(()),
            _ => Err(StyleError::OutOfRange {
                start,
                length,
                text_len: self.char_len,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteTab;
    use crate::config::NotepadPreferences;
    use crate::model::style::{AttributeSet, StyleAttribute};
    use crate::style::StyleError;

    fn tab(text: &str) -> NoteTab {
        NoteTab::new("Note 1", text, &NotepadPreferences::default())
    }

    #[test]
    fn selection_commands_style_selected_range() {
        let mut tab = tab("hello world");
        tab.set_selection(0, 5).unwrap();
        tab.bold_selection();
        tab.underline_selection();

        let expected = AttributeSet::only(StyleAttribute::Bold).with(StyleAttribute::Underline);
        assert_eq!(tab.styles().attributes_at(4), expected);
        assert_eq!(tab.styles().attributes_at(5), AttributeSet::EMPTY);
        assert_eq!(tab.serialize_style(), "0,5,1,1,");
    }

    #[test]
    fn selection_past_text_end_is_rejected() {
        let mut tab = tab("abc");
        let err = tab.set_selection(2, 2).unwrap_err();
        assert_eq!(
            err,
            StyleError::OutOfRange {
                start: 2,
                length: 2,
                text_len: 3,
            }
        );
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let mut tab = tab("héllo");
        assert_eq!(tab.char_len(), 5);
        tab.apply_style(0, 5, StyleAttribute::Italic).unwrap();
    }

    #[test]
    fn set_text_drops_styles_and_selection() {
        let mut tab = tab("abcdef");
        tab.set_selection(1, 3).unwrap();
        tab.italic_selection();
        tab.set_text("xyz");

        assert!(tab.styles().is_empty());
        assert_eq!(tab.selection().length, 0);
    }

    #[test]
    fn restore_style_rejects_intervals_past_text() {
        let mut tab = tab("abc");
        tab.apply_style(0, 1, StyleAttribute::Bold).unwrap();

        let err = tab.restore_style("0,10,1,0,").unwrap_err();
        assert!(matches!(err, StyleError::OutOfRange { text_len: 3, .. }));
        assert_eq!(tab.serialize_style(), "0,1,1,0,");
    }

    #[test]
    fn rename_keeps_identity() {
        let mut tab = tab("");
        let id = tab.id();
        tab.rename("Groceries");
        assert_eq!(tab.title(), "Groceries");
        assert_eq!(tab.id(), id);
    }
}
