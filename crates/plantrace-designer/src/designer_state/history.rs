//! Undo/redo functionality for designer state.

use super::DesignerState;
use crate::history::HistoryState;

impl DesignerState {
    /// Current committed-state snapshot.
    pub(crate) fn snapshot(&self) -> HistoryState {
        HistoryState {
            site: self.site.clone(),
            items: self.items.clone(),
            scale: self.scale,
            drawings: self.drawings.clone(),
        }
    }

    /// Records the live state as a new history entry.
    pub(crate) fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.history.commit(snapshot);
    }

    fn restore(&mut self, state: HistoryState) {
        self.site = state.site;
        self.items = state.items;
        self.scale = state.scale;
        self.drawings = state.drawings;

        if let Some(id) = self.selected {
            if !self.items.iter().any(|item| item.id == id) {
                self.selected = None;
            }
        }
    }

    /// Undoes the last committed change.
    pub fn undo(&mut self) -> bool {
        let Some(state) = self.history.undo().cloned() else {
            return false;
        };
        self.reset_transient();
        self.restore(state);
        self.sync_setup_step();
        tracing::debug!("Undo ({} left)", self.history.undo_count());
        true
    }

    /// Redoes the last undone change.
    pub fn redo(&mut self) -> bool {
        let Some(state) = self.history.redo().cloned() else {
            return false;
        };
        self.reset_transient();
        self.restore(state);
        self.sync_setup_step();
        tracing::debug!("Redo ({} left)", self.history.redo_count());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
