//! SubTypo Error Definitions
//!
//! Defines error types used throughout the engine.
//!
//! Only programmer errors (bad indices) and explicit policy failures are
//! reported through [`CoreError`]. Syntax problems in imported text and
//! field validation failures are returned as data.

use thiserror::Error;

use crate::core::captions::SyntaxError;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Document Errors
    // =========================================================================
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Subtitle not found: {0}")]
    SubtitleNotFound(String),

    // =========================================================================
    // Format Errors
    // =========================================================================
    #[error("Invalid time code: {0}")]
    InvalidTimeCode(String),

    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    #[error("Subtitle import failed with {} syntax error(s)", .errors.len())]
    SubtitleImportFailed { errors: Vec<SyntaxError> },

    #[error("Subtitle text too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: usize, limit: usize },
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Returns the syntax errors carried by a failed import, if any
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        match self {
            Self::SubtitleImportFailed { errors } => errors,
            _ => &[],
        }
    }
}
