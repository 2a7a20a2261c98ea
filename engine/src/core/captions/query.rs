//! Time-Range Queries
//!
//! Answers "which cues are visible at playback position X". Cues are not
//! required to be time-sorted, so every query is a single linear scan with
//! no allocation unless the caller collects the results.

use super::Cue;
use crate::core::PositionMs;

/// Iterates over `(index, cue)` pairs whose interval contains the position
///
/// Both interval ends are inclusive.
pub fn cues_at(cues: &[Cue], position_ms: PositionMs) -> impl Iterator<Item = (usize, &Cue)> {
    cues.iter()
        .enumerate()
        .filter(move |(_, cue)| cue.contains(position_ms))
}

/// Returns every cue whose interval contains the position, in list order
pub fn find_cues_at(cues: &[Cue], position_ms: PositionMs) -> Vec<&Cue> {
    cues_at(cues, position_ms).map(|(_, cue)| cue).collect()
}

/// Returns the index of the first cue active at the position
pub fn first_cue_index_at(cues: &[Cue], position_ms: PositionMs) -> Option<usize> {
    cues_at(cues, position_ms).map(|(index, _)| index).next()
}

/// Returns the list position for a cue created at the playback position
///
/// The new cue goes right after the last cue active at that position, or
/// at the front when nothing is active.
pub fn index_for_new_cue(cues: &[Cue], position_ms: PositionMs) -> usize {
    cues_at(cues, position_ms)
        .map(|(index, _)| index + 1)
        .last()
        .unwrap_or(0)
}
