//! Linear undo/redo history of immutable snapshots.

use std::{collections::VecDeque, num::NonZeroUsize};

/// The default number of snapshots retained.
pub const DEFAULT_LIMIT: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Errors returned when moving past either end of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// There is no earlier state.
    #[error("there are no actions left to undo")]
    NoUndoableState,

    /// There is no later state.
    #[error("there are no actions left to redo")]
    NoRedoableState,
}

/// An ordered sequence of snapshots with a cursor marking the current one.
///
/// Committing after an undo discards every snapshot after the cursor, so the
/// history never branches. At most `limit` snapshots are kept; the oldest are
/// dropped first.
#[derive(Debug, Clone)]
pub struct History<T> {
    states: VecDeque<T>,
    cursor: usize,
    limit: NonZeroUsize,
}

impl<T> History<T> {
    /// Starts a history containing only `initial`.
    #[must_use]
    pub fn new(initial: T, limit: NonZeroUsize) -> Self {
        Self {
            states: VecDeque::from([initial]),
            cursor: 0,
            limit,
        }
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        self.check_invariants();
        &self.states[self.cursor]
    }

    /// Records `state` as the newest snapshot, discarding any redo states.
    pub fn commit(&mut self, state: T) {
        self.states.truncate(self.cursor + 1);
        self.states.push_back(state);
        self.cursor = self.states.len() - 1;

        while self.states.len() > self.limit.get() {
            self.states.pop_front();
            self.cursor -= 1;
        }

        self.check_invariants();
    }

    /// Whether there is an earlier snapshot.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Moves the cursor back one snapshot and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoUndoableState`] if the cursor is at the oldest
    /// snapshot.
    pub fn undo(&mut self) -> Result<&T, Error> {
        if !self.can_undo() {
            return Err(Error::NoUndoableState);
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    /// Whether there is a later snapshot.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    /// Moves the cursor forward one snapshot and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRedoableState`] if the cursor is at the newest
    /// snapshot.
    pub fn redo(&mut self) -> Result<&T, Error> {
        if !self.can_redo() {
            return Err(Error::NoRedoableState);
        }
        self.cursor += 1;
        Ok(self.current())
    }

    /// Discards every snapshot and starts again from `state`.
    pub fn reset(&mut self, state: T) {
        self.states.clear();
        self.states.push_back(state);
        self.cursor = 0;
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; a history holds at least one snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Maximum number of snapshots retained.
    #[must_use]
    pub const fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    fn check_invariants(&self) {
        assert!(
            self.cursor < self.states.len(),
            "history cursor {} out of bounds for {} snapshots",
            self.cursor,
            self.states.len()
        );
    }
}
