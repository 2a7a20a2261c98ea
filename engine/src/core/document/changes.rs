//! Edit Result Types
//!
//! Every document mutation reports exactly one [`CueChange`] so observers
//! (save triggers, list views) can react to each discrete edit.

use serde::{Deserialize, Serialize};

/// Result of a single document edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    /// Document generation after the edit
    pub generation: u64,

    /// What changed
    pub change: CueChange,

    /// Undo availability after the edit
    pub can_undo: bool,

    /// Redo availability after the edit
    pub can_redo: bool,
}

impl EditResult {
    /// Creates a new edit result for the given generation
    pub fn new(generation: u64, change: CueChange) -> Self {
        Self {
            generation,
            change,
            can_undo: false,
            can_redo: false,
        }
    }

    /// Records history availability
    pub fn with_history(mut self, can_undo: bool, can_redo: bool) -> Self {
        self.can_undo = can_undo;
        self.can_redo = can_redo;
        self
    }
}

/// Cue list change types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CueChange {
    CueInserted { index: usize },
    CueReplaced { index: usize },
    CueRemoved { index: usize },
    CuesSwapped { first: usize, second: usize },
    CueMoved { from: usize, to: usize },
    CuesRemoved { count: usize },
    HistoryUndone,
    HistoryRedone,
}
