//! Snapshot History Module
//!
//! Bounded linear undo/redo over deep copies of a cue list.
//!
//! The first snapshot is captured when the history is created and acts as
//! the baseline: it can be returned to but never undone past. Every later
//! push discards the redo branch, appends a snapshot, and moves the cursor
//! onto it. When the list grows beyond its bound the oldest snapshot is
//! evicted and the cursor shifts with it.

use std::collections::VecDeque;

use tracing::debug;

use crate::core::{captions::Cue, MAX_STATES_SIZE};

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable copy of a cue list at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSnapshot {
    /// Cue values at capture time
    pub cues: Vec<Cue>,
}

impl CueSnapshot {
    fn capture(cues: &[Cue]) -> Self {
        Self {
            cues: cues.to_vec(),
        }
    }

    /// Writes this snapshot into `live` without replacing the list
    ///
    /// Existing positions are overwritten, surplus cues are dropped and
    /// missing ones appended.
    fn restore_into(&self, live: &mut Vec<Cue>) {
        live.truncate(self.cues.len());
        let existing = live.len();
        for (slot, cue) in live.iter_mut().zip(&self.cues) {
            slot.clone_from(cue);
        }
        live.extend(self.cues[existing..].iter().cloned());
    }
}

// =============================================================================
// State History
// =============================================================================

/// Bounded snapshot history with a cursor on the materialized state
#[derive(Debug, Clone)]
pub struct StateHistory {
    states: VecDeque<CueSnapshot>,
    cursor: usize,
    max_states: usize,
}

impl StateHistory {
    /// Creates a history whose baseline is `cues`
    pub fn new(cues: &[Cue]) -> Self {
        Self::with_max_states(cues, MAX_STATES_SIZE)
    }

    /// Creates a history with a custom bound (at least one snapshot)
    pub fn with_max_states(cues: &[Cue], max_states: usize) -> Self {
        let mut states = VecDeque::with_capacity(max_states.max(1));
        states.push_back(CueSnapshot::capture(cues));
        Self {
            states,
            cursor: 0,
            max_states: max_states.max(1),
        }
    }

    /// Records the current cue state after a mutation
    pub fn push_state(&mut self, cues: &[Cue]) {
        self.states.truncate(self.cursor + 1);
        self.states.push_back(CueSnapshot::capture(cues));
        self.cursor = self.states.len() - 1;

        while self.states.len() > self.max_states && self.cursor > 0 {
            self.states.pop_front();
            self.cursor -= 1;
        }

        debug!(
            states = self.states.len(),
            cursor = self.cursor,
            "Pushed history state"
        );
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    /// Restores the previous snapshot into `live`
    ///
    /// Returns false (leaving `live` untouched) when there is nothing to undo.
    pub fn undo(&mut self, live: &mut Vec<Cue>) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.restore(live);
        true
    }

    /// Restores the next snapshot into `live`
    ///
    /// Returns false (leaving `live` untouched) when there is nothing to redo.
    pub fn redo(&mut self, live: &mut Vec<Cue>) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.restore(live);
        true
    }

    fn restore(&self, live: &mut Vec<Cue>) {
        if let Some(snapshot) = self.states.get(self.cursor) {
            snapshot.restore_into(live);
            debug!(
                cursor = self.cursor,
                cues = live.len(),
                "Restored history state"
            );
        }
    }

    /// Drops all snapshots and starts over from `cues`
    pub fn reset(&mut self, cues: &[Cue]) {
        self.states.clear();
        self.states.push_back(CueSnapshot::capture(cues));
        self.cursor = 0;
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&CueSnapshot> {
        self.states.get(self.cursor)
    }
}
