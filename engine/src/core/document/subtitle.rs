//! Subtitle Document
//!
//! A named, formatted cue list with its own undo history. All structural
//! edits go through the mutation methods below so that each one is
//! snapshotted, bumps the generation counter, and reports a [`CueChange`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CueChange, EditResult, StateHistory};
use crate::core::{
    captions::{cues_at, index_for_new_cue, Cue, FormatKind},
    new_subtitle_id, CoreError, CoreResult, PositionMs, SubtitleId,
};

// =============================================================================
// Serialized Form
// =============================================================================

/// Persisted fields of a subtitle; history is session-only
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubtitleData {
    id: SubtitleId,
    name: String,
    #[serde(default)]
    format: FormatKind,
    #[serde(default)]
    cues: Vec<Cue>,
}

impl From<SubtitleData> for Subtitle {
    fn from(data: SubtitleData) -> Self {
        let history = StateHistory::new(&data.cues);
        Self {
            id: data.id,
            name: data.name,
            format: data.format,
            cues: data.cues,
            history,
            generation: 0,
        }
    }
}

impl From<Subtitle> for SubtitleData {
    fn from(subtitle: Subtitle) -> Self {
        Self {
            id: subtitle.id,
            name: subtitle.name,
            format: subtitle.format,
            cues: subtitle.cues,
        }
    }
}

// =============================================================================
// Subtitle
// =============================================================================

/// Subtitle document
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "SubtitleData", into = "SubtitleData")]
pub struct Subtitle {
    id: SubtitleId,
    name: String,
    format: FormatKind,
    cues: Vec<Cue>,
    history: StateHistory,
    generation: u64,
}

impl Subtitle {
    /// Creates an empty subtitle
    pub fn new(name: &str, format: FormatKind) -> Self {
        Self::with_cues(name, format, Vec::new())
    }

    /// Creates a subtitle whose baseline state is `cues`
    pub fn with_cues(name: &str, format: FormatKind, cues: Vec<Cue>) -> Self {
        let history = StateHistory::new(&cues);
        Self {
            id: new_subtitle_id(),
            name: name.to_string(),
            format,
            cues,
            history,
            generation: 0,
        }
    }

    /// Rebuilds the history with a different bound, keeping the current cues
    /// as the new baseline
    pub fn with_history_limit(mut self, max_states: usize) -> Self {
        self.history = StateHistory::with_max_states(&self.cues, max_states);
        self
    }

    /// Parses `text` into a new subtitle
    ///
    /// Any syntax error fails the whole import with
    /// [`CoreError::SubtitleImportFailed`], even if cues were recovered.
    pub fn import(name: &str, format: FormatKind, text: &str, limit: usize) -> CoreResult<Self> {
        if text.len() > limit {
            return Err(CoreError::FileTooLarge {
                size: text.len(),
                limit,
            });
        }

        let outcome = format.parse_text(text);
        let cues = outcome.into_result()?;

        info!("Imported subtitle '{}' with {} cues", name, cues.len());
        Ok(Self::with_cues(name, format, cues))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn format(&self) -> FormatKind {
        self.format
    }

    pub fn set_format(&mut self, format: FormatKind) {
        self.format = format;
    }

    /// Display name with the format extension appended (e.g. "English.srt")
    pub fn full_name(&self) -> String {
        format!("{}{}", self.name, self.format.extension())
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Counter bumped by every mutation, undo and redo
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Inserts a cue at `index` (`index == len` appends)
    pub fn insert_cue(&mut self, index: usize, cue: Cue) -> CoreResult<EditResult> {
        if index > self.cues.len() {
            return Err(self.out_of_range(index));
        }
        self.cues.insert(index, cue);
        Ok(self.commit(CueChange::CueInserted { index }))
    }

    /// Appends a cue
    pub fn push_cue(&mut self, cue: Cue) -> EditResult {
        let index = self.cues.len();
        self.cues.push(cue);
        self.commit(CueChange::CueInserted { index })
    }

    /// Inserts an empty cue at a playback position, after any cue already
    /// visible there
    pub fn add_cue_at(&mut self, position_ms: PositionMs, duration_ms: u64) -> EditResult {
        let index = index_for_new_cue(&self.cues, position_ms);
        self.cues
            .insert(index, Cue::starting_at(position_ms, duration_ms));
        self.commit(CueChange::CueInserted { index })
    }

    /// Replaces the cue at `index`, returning the previous value
    pub fn replace_cue(&mut self, index: usize, cue: Cue) -> CoreResult<(Cue, EditResult)> {
        let len = self.cues.len();
        let slot = self
            .cues
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;
        let previous = std::mem::replace(slot, cue);
        Ok((previous, self.commit(CueChange::CueReplaced { index })))
    }

    /// Removes the cue at `index`, returning it
    pub fn remove_cue(&mut self, index: usize) -> CoreResult<(Cue, EditResult)> {
        if index >= self.cues.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.cues.remove(index);
        Ok((removed, self.commit(CueChange::CueRemoved { index })))
    }

    /// Swaps two cues
    pub fn swap_cues(&mut self, first: usize, second: usize) -> CoreResult<EditResult> {
        for index in [first, second] {
            if index >= self.cues.len() {
                return Err(self.out_of_range(index));
            }
        }
        self.cues.swap(first, second);
        Ok(self.commit(CueChange::CuesSwapped { first, second }))
    }

    /// Moves a cue so that it ends up at position `to`
    pub fn move_cue(&mut self, from: usize, to: usize) -> CoreResult<EditResult> {
        for index in [from, to] {
            if index >= self.cues.len() {
                return Err(self.out_of_range(index));
            }
        }
        let cue = self.cues.remove(from);
        self.cues.insert(to, cue);
        Ok(self.commit(CueChange::CueMoved { from, to }))
    }

    /// Removes every cue matching `predicate` as a single undoable edit
    ///
    /// Returns `None` (and records nothing) when no cue matched.
    pub fn remove_matching<F>(&mut self, mut predicate: F) -> Option<EditResult>
    where
        F: FnMut(&Cue) -> bool,
    {
        let before = self.cues.len();
        self.cues.retain(|cue| !predicate(cue));
        let count = before - self.cues.len();
        if count == 0 {
            return None;
        }
        Some(self.commit(CueChange::CuesRemoved { count }))
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous state; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<EditResult> {
        if !self.history.undo(&mut self.cues) {
            return None;
        }
        self.generation += 1;
        Some(self.edit_result(CueChange::HistoryUndone))
    }

    /// Restores the next state; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<EditResult> {
        if !self.history.redo(&mut self.cues) {
            return None;
        }
        self.generation += 1;
        Some(self.edit_result(CueChange::HistoryRedone))
    }

    /// Makes the current cues the new baseline (e.g. after saving)
    pub fn reset_history(&mut self) {
        self.history.reset(&self.cues);
    }

    // -------------------------------------------------------------------------
    // Queries & Export
    // -------------------------------------------------------------------------

    /// Cues visible at a playback position
    pub fn cues_at(&self, position_ms: PositionMs) -> impl Iterator<Item = (usize, &Cue)> {
        cues_at(&self.cues, position_ms)
    }

    /// Serializes the cues using this document's format
    pub fn to_text(&self) -> String {
        self.format.to_text(&self.cues)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn out_of_range(&self, index: usize) -> CoreError {
        CoreError::IndexOutOfRange {
            index,
            len: self.cues.len(),
        }
    }

    fn commit(&mut self, change: CueChange) -> EditResult {
        self.history.push_state(&self.cues);
        self.generation += 1;
        debug!(subtitle = %self.id, generation = self.generation, ?change, "Subtitle edited");
        self.edit_result(change)
    }

    fn edit_result(&self, change: CueChange) -> EditResult {
        EditResult::new(self.generation, change)
            .with_history(self.history.can_undo(), self.history.can_redo())
    }
}

impl Default for Subtitle {
    fn default() -> Self {
        Self::new("", FormatKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MAX_STATES_SIZE;

    fn cue(n: u64) -> Cue {
        Cue::from_millis(n * 1000, n * 1000 + 900, format!("Line {}", n))
    }

    fn subtitle_with(count: u64) -> Subtitle {
        Subtitle::with_cues("English", FormatKind::SubRip, (0..count).map(cue).collect())
    }

    #[test]
    fn test_new_subtitle() {
        let subtitle = Subtitle::new("English", FormatKind::SubRip);

        assert!(subtitle.is_empty());
        assert_eq!(subtitle.full_name(), "English.srt");
        assert_eq!(subtitle.generation(), 0);
        assert!(!subtitle.can_undo());
        assert!(!subtitle.can_redo());
        assert_eq!(subtitle.id().len(), 26);
    }

    #[test]
    fn test_insert_then_undo_restores_baseline() {
        let mut subtitle = subtitle_with(1);

        let result = subtitle.insert_cue(1, cue(1)).unwrap();
        assert_eq!(result.change, CueChange::CueInserted { index: 1 });
        assert!(result.can_undo);
        assert!(subtitle.can_undo());

        let undone = subtitle.undo().unwrap();
        assert_eq!(undone.change, CueChange::HistoryUndone);
        assert_eq!(subtitle.cues(), &[cue(0)]);
        assert!(subtitle.can_redo());
        assert!(!subtitle.can_undo());
    }

    #[test]
    fn test_undo_redo_symmetry() {
        let mut subtitle = subtitle_with(3);
        let initial = subtitle.cues().to_vec();

        subtitle.insert_cue(0, cue(9)).unwrap();
        subtitle.replace_cue(2, cue(7)).unwrap();
        subtitle.swap_cues(0, 3).unwrap();
        subtitle.remove_cue(1).unwrap();
        subtitle.move_cue(0, 2).unwrap();
        let edited = subtitle.cues().to_vec();

        for _ in 0..5 {
            assert!(subtitle.undo().is_some());
        }
        assert_eq!(subtitle.cues(), initial.as_slice());
        assert!(subtitle.undo().is_none());

        for _ in 0..5 {
            assert!(subtitle.redo().is_some());
        }
        assert_eq!(subtitle.cues(), edited.as_slice());
        assert!(subtitle.redo().is_none());
    }

    #[test]
    fn test_history_bound_through_document() {
        let mut subtitle = Subtitle::new("English", FormatKind::SubRip);

        for n in 0..30 {
            subtitle.push_cue(cue(n));
            assert!(subtitle.history().len() <= MAX_STATES_SIZE);
        }

        let mut undone = 0;
        while subtitle.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, MAX_STATES_SIZE - 1);
        assert_eq!(subtitle.len(), 30 - (MAX_STATES_SIZE - 1));
    }

    #[test]
    fn test_custom_history_limit() {
        let mut subtitle = subtitle_with(0).with_history_limit(3);

        for n in 0..5 {
            subtitle.push_cue(cue(n));
        }
        assert_eq!(subtitle.history().len(), 3);
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut subtitle = subtitle_with(2);

        assert!(matches!(
            subtitle.insert_cue(3, cue(3)),
            Err(CoreError::IndexOutOfRange { index: 3, len: 2 })
        ));
        assert!(subtitle.replace_cue(2, cue(3)).is_err());
        assert!(subtitle.remove_cue(2).is_err());
        assert!(subtitle.swap_cues(0, 2).is_err());
        assert!(subtitle.move_cue(2, 0).is_err());

        assert_eq!(subtitle.generation(), 0);
        assert!(!subtitle.can_undo());
    }

    #[test]
    fn test_each_mutation_is_separately_observable() {
        let mut subtitle = subtitle_with(2);

        let first = subtitle.push_cue(cue(2));
        let second = subtitle.push_cue(cue(3));

        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert_eq!(subtitle.history().len(), 3);
    }

    #[test]
    fn test_replace_and_remove_return_previous_values() {
        let mut subtitle = subtitle_with(2);

        let (previous, _) = subtitle.replace_cue(0, cue(5)).unwrap();
        assert_eq!(previous, cue(0));

        let (removed, result) = subtitle.remove_cue(1).unwrap();
        assert_eq!(removed, cue(1));
        assert_eq!(result.change, CueChange::CueRemoved { index: 1 });
        assert_eq!(subtitle.cues(), &[cue(5)]);
    }

    #[test]
    fn test_move_cue() {
        let mut subtitle = subtitle_with(4);

        subtitle.move_cue(0, 3).unwrap();
        assert_eq!(subtitle.cues(), &[cue(1), cue(2), cue(3), cue(0)]);

        subtitle.move_cue(3, 1).unwrap();
        assert_eq!(subtitle.cues(), &[cue(1), cue(0), cue(2), cue(3)]);
    }

    #[test]
    fn test_remove_matching() {
        let mut subtitle = subtitle_with(4);

        assert!(subtitle.remove_matching(|c| c.text == "missing").is_none());
        assert!(!subtitle.can_undo());

        let result = subtitle
            .remove_matching(|c| c.start_time.as_millis() >= 2000)
            .unwrap();
        assert_eq!(result.change, CueChange::CuesRemoved { count: 2 });
        assert_eq!(subtitle.len(), 2);

        subtitle.undo();
        assert_eq!(subtitle.len(), 4);
    }

    #[test]
    fn test_add_cue_at_position() {
        let mut subtitle = subtitle_with(3);

        subtitle.add_cue_at(1_500, 2_000);
        let added = subtitle.cue(2).unwrap();
        assert_eq!(added.start_time.as_millis(), 1_500);
        assert_eq!(added.end_time.as_millis(), 3_500);
        assert!(added.text.is_empty());

        subtitle.add_cue_at(50_000, 2_000);
        assert_eq!(subtitle.cue(0).unwrap().start_time.as_millis(), 50_000);
    }

    #[test]
    fn test_reset_history() {
        let mut subtitle = subtitle_with(1);
        subtitle.push_cue(cue(1));

        subtitle.reset_history();

        assert!(!subtitle.can_undo());
        assert!(subtitle.undo().is_none());
        assert_eq!(subtitle.len(), 2);
    }

    #[test]
    fn test_import() {
        let text = "1\n00:00:01,000 --> 00:00:02,000\nHello\n";
        let subtitle = Subtitle::import("English", FormatKind::SubRip, text, 1024).unwrap();

        assert_eq!(subtitle.len(), 1);
        assert_eq!(subtitle.to_text(), text.trim_end());
        assert!(!subtitle.can_undo());
    }

    #[test]
    fn test_import_with_errors_fails() {
        let text = "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n3\n00:00:02,000 --> 00:00:03,000\nWorld\n\n";

        let err = Subtitle::import("English", FormatKind::SubRip, text, 1024).unwrap_err();
        assert!(matches!(err, CoreError::SubtitleImportFailed { .. }));
        assert_eq!(err.syntax_errors().len(), 1);
    }

    #[test]
    fn test_import_too_large() {
        let text = "1\n00:00:01,000 --> 00:00:02,000\nHello\n";
        let err = Subtitle::import("English", FormatKind::SubRip, text, 8).unwrap_err();

        assert!(matches!(err, CoreError::FileTooLarge { limit: 8, .. }));
    }

    #[test]
    fn test_cues_at_delegates_to_query() {
        let subtitle = subtitle_with(3);

        let active: Vec<usize> = subtitle.cues_at(1_000).map(|(index, _)| index).collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn test_serialization_skips_history() {
        let mut subtitle = subtitle_with(2);
        subtitle.push_cue(cue(2));

        let json = serde_json::to_string(&subtitle).unwrap();
        assert!(json.contains("\"startTime\":0"));
        assert!(!json.contains("history"));

        let restored: Subtitle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id(), subtitle.id());
        assert_eq!(restored.cues(), subtitle.cues());
        assert!(!restored.can_undo());
    }
}
