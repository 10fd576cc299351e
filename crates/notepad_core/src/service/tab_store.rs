//! Ordered note tab collection.
//!
//! # Responsibility
//! - Own every open `NoteTab` in display order and track the active one.
//! - Provide add/remove/reorder and bulk session export/import.
//!
//! # Invariants
//! - Insertion order = display order = persistence order.
//! - `active` is `Some(i)` with `i < len` whenever the store is non-empty,
//!   and `None` when it is empty.
//! - A corrupt style blob never prevents a tab from being added.

use crate::config::NotepadPreferences;
use crate::model::session::SessionEntry;
use crate::model::tab::NoteTab;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller contract violations on the tab store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfBounds { index: usize, len: usize },
    /// Swap indices are not adjacent or not both in bounds.
    InvalidSwap { first: usize, second: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "tab index {index} out of bounds for {len} tab(s)")
            }
            Self::InvalidSwap { first, second, len } => write!(
                f,
                "cannot swap tabs {first} and {second} of {len}: indices must be adjacent and in bounds"
            ),
        }
    }
}

impl Error for StoreError {}

/// Ordered collection of note tabs plus the active selection.
#[derive(Debug, Clone, Default)]
pub struct NoteTabStore {
    tabs: Vec<NoteTab>,
    active: Option<usize>,
}

impl NoteTabStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteTab> {
        self.tabs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&NoteTab> {
        self.tabs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NoteTab> {
        self.tabs.get_mut(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn set_active(&mut self, index: usize) -> StoreResult<()> {
        self.check_index(index)?;
        self.active = Some(index);
        Ok(())
    }

    pub fn active_tab(&self) -> Option<&NoteTab> {
        self.active.and_then(|index| self.tabs.get(index))
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut NoteTab> {
        self.active.and_then(|index| self.tabs.get_mut(index))
    }

    /// Appends a tab and returns its index.
    ///
    /// A non-empty `initial_style_blob` is restored immediately; if it is
    /// malformed or out of range the tab keeps zero styling. The first tab
    /// added to an empty store becomes active.
    pub fn add_tab(
        &mut self,
        title: impl Into<String>,
        initial_text: impl Into<String>,
        initial_style_blob: &str,
        prefs: &NotepadPreferences,
    ) -> usize {
        let mut tab = NoteTab::new(title, initial_text, prefs);
        if !initial_style_blob.is_empty() {
            if let Err(err) = tab.restore_style(initial_style_blob) {
                warn!(
                    "event=tab_style_restore module=store status=fallback tab_id={} error={}",
                    tab.id(),
                    err
                );
            }
        }

        let index = self.tabs.len();
        debug!(
            "event=tab_add module=store status=ok tab_id={} index={index} styled={}",
            tab.id(),
            !tab.styles().is_empty()
        );
        self.tabs.push(tab);
        if self.active.is_none() {
            self.active = Some(index);
        }
        index
    }

    /// Exchanges two adjacent tabs. The active selection follows its tab.
    ///
    /// # Errors
    /// - `InvalidSwap` when the indices are not adjacent or out of bounds.
    pub fn swap_adjacent(&mut self, first: usize, second: usize) -> StoreResult<()> {
        let len = self.tabs.len();
        if first.abs_diff(second) != 1 || first >= len || second >= len {
            return Err(StoreError::InvalidSwap { first, second, len });
        }

        self.tabs.swap(first, second);
        self.active = self.active.map(|active| match active {
            a if a == first => second,
            a if a == second => first,
            a => a,
        });
        Ok(())
    }

    /// Removes and returns a tab; its text and styles are released with it.
    ///
    /// The active selection moves to the tab now at the same position, or to
    /// the new last tab when the removed one was last.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` when `index` does not name a tab.
    pub fn remove_tab(&mut self, index: usize) -> StoreResult<NoteTab> {
        self.check_index(index)?;
        let removed = self.tabs.remove(index);
        let remaining = self.tabs.len();

        self.active = match self.active {
            _ if remaining == 0 => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(remaining - 1)),
            None => Some(0),
        };
        info!(
            "event=tab_remove module=store status=ok tab_id={} remaining={remaining}",
            removed.id()
        );
        Ok(removed)
    }

    /// Persistable snapshot of every tab in display order.
    pub fn export_session(&self) -> Vec<SessionEntry> {
        self.tabs
            .iter()
            .map(|tab| SessionEntry::new(tab.title(), tab.text(), tab.serialize_style()))
            .collect()
    }

    /// Rebuilds the store from a persisted snapshot.
    ///
    /// An empty snapshot yields exactly one tab titled `"{prefix} 1"`. The
    /// last restored tab becomes active. Each entry's style is restored
    /// independently; one corrupt blob does not affect the others.
    pub fn import_session(&mut self, entries: Vec<SessionEntry>, prefs: &NotepadPreferences) {
        self.tabs.clear();
        self.active = None;

        if entries.is_empty() {
            self.add_tab(prefs.default_tab_title(1), "", "", prefs);
        } else {
            for entry in entries {
                self.add_tab(entry.title, entry.text, &entry.style, prefs);
            }
        }

        self.active = self.tabs.len().checked_sub(1);
        info!(
            "event=session_import module=store status=ok tabs={}",
            self.tabs.len()
        );
    }

    /// Pushes a new preference snapshot to every tab.
    pub fn apply_preferences(&mut self, prefs: &NotepadPreferences) {
        for tab in &mut self.tabs {
            tab.apply_preferences(prefs);
        }
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index < self.tabs.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfBounds {
                index,
                len: self.tabs.len(),
            })
        }
    }
}
