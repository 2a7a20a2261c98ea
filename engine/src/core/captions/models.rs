//! Cue Data Model
//!
//! Defines the single subtitle entry held by a document.
//!
//! # Overview
//!
//! A cue is a plain value: two time codes and a text payload. The
//! `start <= end` ordering is a soft rule checked by editors through
//! [`crate::core::captions::check_time_range`]; the model itself accepts
//! out-of-order times so intermediate edit states remain representable.

use serde::{Deserialize, Serialize};

use super::TimeCode;
use crate::core::PositionMs;

/// A single subtitle entry with timing and text
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    /// Time the cue becomes visible
    pub start_time: TimeCode,
    /// Time the cue is hidden (inclusive)
    pub end_time: TimeCode,
    /// Cue text (may contain line breaks)
    pub text: String,
}

impl Cue {
    /// Creates a new cue
    pub fn new(start_time: TimeCode, end_time: TimeCode, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Creates a cue from raw millisecond bounds
    pub fn from_millis(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self::new(TimeCode::from_millis(start_ms), TimeCode::from_millis(end_ms), text)
    }

    /// Creates an empty cue starting at a playback position
    ///
    /// Used by editors when the user adds a cue at the current video position.
    pub fn starting_at(position_ms: PositionMs, duration_ms: u64) -> Self {
        let start = TimeCode::from_millis(position_ms);
        Self::new(start, start.saturating_add_ms(duration_ms), String::new())
    }

    /// Returns the cue duration, or 0 when the times are out of order
    pub fn duration_ms(&self) -> u64 {
        self.end_time
            .as_millis()
            .saturating_sub(self.start_time.as_millis())
    }

    /// Returns true if the position lies within `[start, end]`
    pub fn contains(&self, position_ms: PositionMs) -> bool {
        self.start_time.as_millis() <= position_ms && position_ms <= self.end_time.as_millis()
    }

    /// Returns true if the start time does not come after the end time
    pub fn is_time_ordered(&self) -> bool {
        self.start_time <= self.end_time
    }

    /// Sets new text for this cue
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
