//! Notepad command surface.
//!
//! # Responsibility
//! - Expose the host-facing commands (new/clear/style/save/rename/move).
//! - Restore and flush session state through `NoteTabStore`.
//! - Broadcast preference changes to every live tab.
//!
//! # Invariants
//! - Every command except `new_note` silently no-ops when no tab is open.
//! - The view holds the only preference snapshot tabs are rendered from.

use crate::config::NotepadPreferences;
use crate::model::session::SessionMemento;
use crate::model::tab::NoteTab;
use crate::repo::session_repo::{RepoResult, SessionRepository};
use crate::service::export::{export_note_text, ExportError, ExportOutcome};
use crate::service::tab_store::NoteTabStore;
use crate::style::StyleResult;
use log::{debug, info};
use std::path::Path;

/// Notepad panel state driven by host UI commands.
#[derive(Debug, Clone, Default)]
pub struct NotepadView {
    store: NoteTabStore,
    preferences: NotepadPreferences,
}

impl NotepadView {
    /// Creates a view with no tabs; call `restore_session` next.
    pub fn new(preferences: NotepadPreferences) -> Self {
        Self {
            store: NoteTabStore::new(),
            preferences,
        }
    }

    pub fn store(&self) -> &NoteTabStore {
        &self.store
    }

    pub fn preferences(&self) -> &NotepadPreferences {
        &self.preferences
    }

    pub fn active_tab(&self) -> Option<&NoteTab> {
        self.store.active_tab()
    }

    /// Rebuilds tabs from the previous session, or one default tab when
    /// there is none.
    pub fn restore_session(&mut self, memento: Option<&SessionMemento>) {
        let entries = memento
            .map(|memento| memento.to_entries(&self.preferences.name_prefix))
            .unwrap_or_default();
        self.store.import_session(entries, &self.preferences);
    }

    /// Snapshot of every tab for the host to persist.
    pub fn save_state(&self) -> SessionMemento {
        SessionMemento::from_entries(&self.store.export_session())
    }

    /// Restores from a session repository.
    ///
    /// # Errors
    /// - Repository errors; no tab is touched in that case.
    pub fn restore_from<R: SessionRepository>(&mut self, repo: &R) -> RepoResult<()> {
        let memento = repo.load_memento()?;
        self.restore_session(Some(&memento));
        Ok(())
    }

    /// Persists the current session through a repository.
    pub fn persist_to<R: SessionRepository>(&self, repo: &mut R) -> RepoResult<()> {
        repo.save_memento(&self.save_state())
    }

    /// Selects a tab by display position. Out-of-range indices are ignored.
    pub fn select_tab(&mut self, index: usize) {
        if self.store.set_active(index).is_err() {
            debug!("event=tab_select module=view status=ignored index={index}");
        }
    }

    /// Forwards the host widget's selection to the active tab.
    ///
    /// # Errors
    /// - `OutOfRange` when the selection exceeds the active tab's text.
    pub fn set_selection(&mut self, start: usize, length: usize) -> StyleResult<()> {
        match self.store.active_tab_mut() {
            Some(tab) => tab.set_selection(start, length),
            None => Ok(()),
        }
    }

    /// Replaces the active tab's text, as typed by the user.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.set_text(text);
        }
    }

    /// Appends `"{prefix} {n}"`, where `n` is the new tab count, and selects it.
    pub fn new_note(&mut self) -> usize {
        let title = self.preferences.default_tab_title(self.store.len() + 1);
        let index = self.store.add_tab(title, "", "", &self.preferences);
        self.select_tab(index);
        info!("event=note_new module=view status=ok index={index}");
        index
    }

    pub fn clear_note(&mut self) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.clear_text();
        }
    }

    pub fn bold(&mut self) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.bold_selection();
        }
    }

    pub fn italic(&mut self) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.italic_selection();
        }
    }

    pub fn underline(&mut self) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.underline_selection();
        }
    }

    pub fn clear_style(&mut self) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.clear_selection_styles();
        }
    }

    /// Exports the active tab's plain text.
    ///
    /// # Errors
    /// - `ExportError::Io` when writing fails; the host shows the message.
    pub fn save(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<ExportOutcome, ExportError> {
        match self.store.active_tab() {
            Some(tab) => export_note_text(path, tab.text(), overwrite),
            None => Ok(ExportOutcome::Skipped),
        }
    }

    pub fn rename(&mut self, new_title: impl Into<String>) {
        if let Some(tab) = self.store.active_tab_mut() {
            tab.rename(new_title);
        }
    }

    /// Moves the active tab one position left; no-op on the first tab.
    pub fn move_left(&mut self) {
        let Some(active) = self.store.active_index() else {
            return;
        };
        if active == 0 {
            return;
        }
        self.swap_with_active(active, active - 1);
    }

    /// Moves the active tab one position right; no-op on the last tab.
    pub fn move_right(&mut self) {
        let Some(active) = self.store.active_index() else {
            return;
        };
        if active + 1 >= self.store.len() {
            return;
        }
        self.swap_with_active(active, active + 1);
    }

    /// Closes the active tab.
    pub fn close_current(&mut self) {
        if let Some(active) = self.store.active_index() {
            let _ = self.store.remove_tab(active);
        }
    }

    /// Stores the new preference snapshot and re-renders every tab from it.
    pub fn on_preference_change(&mut self, preferences: NotepadPreferences) {
        self.preferences = preferences;
        self.store.apply_preferences(&self.preferences);
        debug!(
            "event=preferences_change module=view status=ok tabs={}",
            self.store.len()
        );
    }

    fn swap_with_active(&mut self, active: usize, neighbour: usize) {
        // Both indices were bounds-checked by the caller.
        let _ = self.store.swap_adjacent(active, neighbour);
    }
}
