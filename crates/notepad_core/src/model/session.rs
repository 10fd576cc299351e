//! Persisted session shape.
//!
//! # Responsibility
//! - Define the per-tab persisted triple (`title`, `text`, `style`).
//! - Map entries to and from the flat key/value memento the host stores.
//!
//! # Invariants
//! - Entry order equals tab display order.
//! - Memento keys are `NumOfTabs`, `TabTitle{i}`, `TabText{i}`, `TabStyle{i}`.
//! - Reading a memento never fails; missing pieces degrade to defaults.
//! - The restored tab count never exceeds the highest indexed key present.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MEMENTO_COUNT_KEY: &str = "NumOfTabs";
pub const MEMENTO_TITLE_PREFIX_KEY: &str = "TabTitle";
pub const MEMENTO_TEXT_PREFIX_KEY: &str = "TabText";
pub const MEMENTO_STYLE_PREFIX_KEY: &str = "TabStyle";

/// One tab's persistable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub title: String,
    pub text: String,
    /// Serialized style blob; empty when the tab is unstyled.
    pub style: String,
}

impl SessionEntry {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            style: style.into(),
        }
    }
}

/// Flat key/value session state, as persisted by the host between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMemento {
    values: BTreeMap<String, String>,
}

impl SessionMemento {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builds the memento for tabs in display order.
    pub fn from_entries(entries: &[SessionEntry]) -> Self {
        let mut memento = Self::new();
        memento.put(MEMENTO_COUNT_KEY, entries.len().to_string());
        for (index, entry) in entries.iter().enumerate() {
            memento.put(format!("{MEMENTO_TITLE_PREFIX_KEY}{index}"), entry.title.as_str());
            memento.put(format!("{MEMENTO_TEXT_PREFIX_KEY}{index}"), entry.text.as_str());
            memento.put(format!("{MEMENTO_STYLE_PREFIX_KEY}{index}"), entry.style.as_str());
        }
        memento
    }

    /// Number of persisted tabs; `0` when absent or unreadable.
    ///
    /// A count larger than the indexed keys support is clamped to one past
    /// the highest `TabTitle{i}`/`TabText{i}`/`TabStyle{i}` index present.
    pub fn tab_count(&self) -> usize {
        let Some(raw) = self.get(MEMENTO_COUNT_KEY) else {
            return 0;
        };
        let declared = match raw.trim().parse::<usize>() {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    "event=session_read module=session status=fallback reason=invalid_count value={raw} error={err}"
                );
                return 0;
            }
        };

        let supported = self.indexed_key_bound();
        if declared > supported {
            warn!(
                "event=session_read module=session status=fallback reason=count_exceeds_keys declared={declared} restored={supported}"
            );
            return supported;
        }
        declared
    }

    /// Reads the persisted entries in display order.
    ///
    /// A missing title becomes `"{name_prefix} {position}"`; missing text or
    /// style become empty.
    pub fn to_entries(&self, name_prefix: &str) -> Vec<SessionEntry> {
        (0..self.tab_count())
            .map(|index| {
                let title = self
                    .get(&format!("{MEMENTO_TITLE_PREFIX_KEY}{index}"))
                    .map_or_else(|| format!("{name_prefix} {}", index + 1), str::to_string);
                let text = self
                    .get(&format!("{MEMENTO_TEXT_PREFIX_KEY}{index}"))
                    .unwrap_or_default();
                let style = self
                    .get(&format!("{MEMENTO_STYLE_PREFIX_KEY}{index}"))
                    .unwrap_or_default();
                SessionEntry::new(title, text, style)
            })
            .collect()
    }

    fn indexed_key_bound(&self) -> usize {
        self.values
            .keys()
            .filter_map(|key| {
                [
                    MEMENTO_TITLE_PREFIX_KEY,
                    MEMENTO_TEXT_PREFIX_KEY,
                    MEMENTO_STYLE_PREFIX_KEY,
                ]
                .iter()
                .find_map(|prefix| key.strip_prefix(prefix))
                .and_then(|index| index.parse::<usize>().ok())
            })
            .max()
            .map_or(0, |index| index.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionEntry, SessionMemento, MEMENTO_COUNT_KEY};

    #[test]
    fn from_entries_writes_indexed_keys() {
        let memento = SessionMemento::from_entries(&[
            SessionEntry::new("Note 1", "hello", "0,5,1,0,"),
            SessionEntry::new("Note 2", "", ""),
        ]);

        assert_eq!(memento.get(MEMENTO_COUNT_KEY), Some("2"));
        assert_eq!(memento.get("TabTitle0"), Some("Note 1"));
        assert_eq!(memento.get("TabText0"), Some("hello"));
        assert_eq!(memento.get("TabStyle0"), Some("0,5,1,0,"));
        assert_eq!(memento.get("TabTitle1"), Some("Note 2"));
    }

    #[test]
    fn entries_round_trip_through_memento() {
        let entries = vec![
            SessionEntry::new("A", "first", ""),
            SessionEntry::new("B", "second", "0,3,2,1,"),
        ];
        let memento = SessionMemento::from_entries(&entries);
        assert_eq!(memento.to_entries("Note"), entries);
    }

    #[test]
    fn invalid_count_reads_as_empty_session() {
        let mut memento = SessionMemento::new();
        memento.put(MEMENTO_COUNT_KEY, "many");
        assert_eq!(memento.tab_count(), 0);
        assert!(memento.to_entries("Note").is_empty());
    }

    #[test]
    fn missing_fields_degrade_to_defaults() {
        let mut memento = SessionMemento::new();
        memento.put(MEMENTO_COUNT_KEY, "2");
        memento.put("TabText1", "kept");

        let entries = memento.to_entries("Memo");
        assert_eq!(entries[0], SessionEntry::new("Memo 1", "", ""));
        assert_eq!(entries[1], SessionEntry::new("Memo 2", "kept", ""));
    }

    #[test]
    fn oversized_count_is_clamped_to_present_keys() {
        let mut memento = SessionMemento::new();
        memento.put(MEMENTO_COUNT_KEY, "3000000");
        memento.put("TabTitle0", "Only");
        memento.put("TabText0", "real tab");

        assert_eq!(memento.tab_count(), 1);
        assert_eq!(
            memento.to_entries("Note"),
            vec![SessionEntry::new("Only", "real tab", "")]
        );
    }

    #[test]
    fn count_without_any_indexed_keys_restores_nothing() {
        let mut memento = SessionMemento::new();
        memento.put(MEMENTO_COUNT_KEY, "4000000000");
        memento.put("TabTitleX", "not an index");

        assert_eq!(memento.tab_count(), 0);
        assert!(memento.to_entries("Note").is_empty());
    }
}
