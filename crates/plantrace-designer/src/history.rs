//! Linear undo/redo over immutable snapshots.

use plantrace_core::constants::HISTORY_DEPTH;
use plantrace_core::Scale;
use serde::{Deserialize, Serialize};

use crate::model::{DrawingElement, PlacedItem, Site};

/// Everything undo/redo restores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    pub site: Site,
    pub items: Vec<PlacedItem>,
    pub scale: Option<Scale>,
    pub drawings: Vec<DrawingElement>,
}

/// Snapshot stack with a cursor pointing at the current state.
///
/// Entries after the cursor are the redo list; committing drops them.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryState>,
    cursor: usize,
    max_depth: usize,
}

impl History {
    /// Create a history with default depth (100) and an empty baseline
    pub fn new() -> Self {
        Self::with_depth(HISTORY_DEPTH)
    }

    /// Create with custom maximum depth; the baseline counts towards it
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            entries: vec![HistoryState::default()],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Record a new current state
    pub fn commit(&mut self, state: HistoryState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);

        if self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
        tracing::debug!(
            "History commit: {} entries, cursor {}",
            self.entries.len(),
            self.cursor
        );
    }

    /// Step back; returns the state to restore
    pub fn undo(&mut self) -> Option<&HistoryState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward; returns the state to restore
    pub fn redo(&mut self) -> Option<&HistoryState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn current(&self) -> Option<&HistoryState> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    /// Clear all history and seed `baseline` as the only entry
    pub fn reset(&mut self, baseline: HistoryState) {
        self.entries.clear();
        self.entries.push(baseline);
        self.cursor = 0;
    }

    /// Clear all history back to an empty baseline
    pub fn clear(&mut self) {
        self.reset(HistoryState::default());
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn state_with(n: usize) -> HistoryState {
        let points = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
        HistoryState {
            site: Site::tracing(points),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_has_baseline_only() {
        let history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&HistoryState::default()));
    }

    #[test]
    fn test_commit_truncates_redo() {
        let mut history = History::new();
        history.commit(state_with(1));
        history.commit(state_with(2));
        assert_eq!(history.undo(), Some(&state_with(1)));
        assert!(history.can_redo());

        history.commit(state_with(5));
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(&state_with(1)));
        assert_eq!(history.redo(), Some(&state_with(5)));
    }

    #[test]
    fn test_undo_stops_at_baseline() {
        let mut history = History::new();
        history.commit(state_with(1));
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 1);
    }

    #[test]
    fn test_depth_limit_drops_oldest() {
        let mut history = History::with_depth(3);
        for i in 1..=5 {
            history.commit(state_with(i));
        }
        assert_eq!(history.undo_count(), 2);
        history.undo();
        assert_eq!(history.undo(), Some(&state_with(3)));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_reset_seeds_baseline() {
        let mut history = History::new();
        history.commit(state_with(2));
        history.reset(state_with(1));
        assert!(!history.can_undo());
        assert_eq!(history.current(), Some(&state_with(1)));
    }
}
