//! Undo/redo history of board content.

use std::collections::VecDeque;

use crate::CanvasShape;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// The part of a board that undo/redo restores.
///
/// Selection is not part of a snapshot; selecting is not an undoable edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Elements at the time of the snapshot.
    pub elements: Vec<CanvasShape>,
    /// Page count at the time of the snapshot.
    pub number_of_pages: u32,
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history keeping at most `limit` undo steps.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// Record the state as it was before an edit.
    ///
    /// Any redo steps are discarded. When the limit is exceeded the oldest
    /// step is dropped.
    pub fn record(&mut self, previous: Snapshot) {
        self.future.clear();
        self.past.push_back(previous);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }

    /// Step back: returns the state to restore, stashing `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward: returns the state to restore, stashing `current` for undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    /// Whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Forget all steps.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
