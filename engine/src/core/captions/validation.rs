//! Editor Field Validation
//!
//! Checks used by cue and subtitle editor fields while the user types.
//! Every check returns a [`ValidationResult`]; nothing here fails with an
//! error, so a bad field never interrupts the editing session.

use serde::{Deserialize, Serialize};

use super::{Cue, TimeCode};

pub const INVALID_TIME_MESSAGE: &str = "Time must use the format hh:mm:ss,mmm";
pub const EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty or contain blank lines";
pub const TIME_RANGE_MESSAGE: &str = "Start time must not be after end time";
pub const EMPTY_NAME_MESSAGE: &str = "Name cannot be empty";

/// Outcome of validating a single editor field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationResult {
    Valid,
    Invalid { message: String },
}

impl ValidationResult {
    fn invalid(message: &str) -> Self {
        Self::Invalid {
            message: message.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the error message for an invalid field
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } => Some(message.as_str()),
        }
    }
}

/// Validates a time code field (surrounding whitespace is ignored)
pub fn check_time(text: &str) -> ValidationResult {
    if TimeCode::is_valid(text.trim()) {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(INVALID_TIME_MESSAGE)
    }
}

/// Validates cue text: it must not be empty and no line may be blank
pub fn check_text(text: &str) -> ValidationResult {
    if text.is_empty() || text.split('\n').any(|line| line.trim().is_empty()) {
        ValidationResult::invalid(EMPTY_TEXT_MESSAGE)
    } else {
        ValidationResult::Valid
    }
}

/// Validates a pair of time fields, including their ordering
///
/// Ordering is an editor rule only; documents accept out-of-order cues.
pub fn check_time_range(start_text: &str, end_text: &str) -> ValidationResult {
    match (
        TimeCode::parse(start_text.trim()),
        TimeCode::parse(end_text.trim()),
    ) {
        (Ok(start), Ok(end)) if start <= end => ValidationResult::Valid,
        (Ok(_), Ok(_)) => ValidationResult::invalid(TIME_RANGE_MESSAGE),
        _ => ValidationResult::invalid(INVALID_TIME_MESSAGE),
    }
}

/// Validates a subtitle display name
pub fn check_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        ValidationResult::invalid(EMPTY_NAME_MESSAGE)
    } else {
        ValidationResult::Valid
    }
}

/// Returns true if the edited field values differ from the original cue
pub fn is_cue_modified(original: &Cue, start_text: &str, end_text: &str, text: &str) -> bool {
    original.start_time.to_text() != start_text
        || original.end_time.to_text() != end_text
        || original.text != text
}
