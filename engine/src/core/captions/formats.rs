//! Subtitle Format Registry
//!
//! Defines the codec interface shared by all subtitle text formats, the
//! closed registry that maps format tags and file extensions to codecs,
//! and the structured results produced by parsing.
//!
//! # Example
//!
//! ```rust,ignore
//! use subtypo_lib::core::captions::FormatKind;
//!
//! let format = FormatKind::from_extension(".srt")?;
//! let outcome = format.parse_text(&content);
//! for error in &outcome.errors {
//!     println!("{}", error);
//! }
//! let text = format.to_text(&outcome.cues);
//! ```
//!
//! Adding a format means one codec implementing [`SubtitleFormat`] plus one
//! [`FormatKind`] variant; parse and serialize call sites stay untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cue, SubRipFormat};
use crate::core::{CoreError, CoreResult};

// =============================================================================
// Parse Results
// =============================================================================

/// A non-fatal problem found while parsing subtitle text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxError {
    /// Human-readable description
    pub message: String,
    /// 0-based index of the offending line
    pub line_number: usize,
}

impl SyntaxError {
    /// Creates a new syntax error
    pub fn new(message: impl Into<String>, line_number: usize) -> Self {
        Self {
            message: message.into(),
            line_number,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number + 1, self.message)
    }
}

/// Cues recovered from a parse together with every syntax error found
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    /// Cues recovered in source order
    pub cues: Vec<Cue>,
    /// Syntax errors in the order they were found
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    /// Returns true if no syntax error was found
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Applies the all-or-nothing import policy
    ///
    /// Any syntax error fails the import, even though cues were recovered.
    pub fn into_result(self) -> CoreResult<Vec<Cue>> {
        if self.errors.is_empty() {
            Ok(self.cues)
        } else {
            Err(CoreError::SubtitleImportFailed {
                errors: self.errors,
            })
        }
    }
}

// =============================================================================
// Codec Interface
// =============================================================================

/// Bidirectional conversion between cues and a subtitle text format
pub trait SubtitleFormat: Send + Sync + fmt::Debug {
    /// Display name of the format (e.g. "SubRip")
    fn name(&self) -> &'static str;

    /// File extension including the leading dot (e.g. ".srt")
    fn extension(&self) -> &'static str;

    /// Serializes cues in list order
    fn to_text(&self, cues: &[Cue]) -> String;

    /// Parses text, recovering as many cues and reporting as many errors as possible
    fn parse_text(&self, text: &str) -> ParseOutcome;
}

// =============================================================================
// Registry
// =============================================================================

static SUBRIP: SubRipFormat = SubRipFormat;

/// Tag identifying the format of a subtitle document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// SubRip (.srt)
    #[default]
    SubRip,
}

impl FormatKind {
    /// Every registered format
    pub const ALL: &'static [FormatKind] = &[FormatKind::SubRip];

    /// Returns the codec for this format
    pub fn codec(self) -> &'static dyn SubtitleFormat {
        match self {
            Self::SubRip => &SUBRIP,
        }
    }

    /// Looks up a format by file extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> CoreResult<Self> {
        let wanted = extension.trim().trim_start_matches('.');
        Self::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.extension()
                    .trim_start_matches('.')
                    .eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::UnsupportedFormat(extension.to_string()))
    }

    /// Returns the extensions of every registered format
    pub fn available_extensions() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.extension()).collect()
    }

    pub fn name(self) -> &'static str {
        self.codec().name()
    }

    pub fn extension(self) -> &'static str {
        self.codec().extension()
    }

    pub fn to_text(self, cues: &[Cue]) -> String {
        self.codec().to_text(cues)
    }

    pub fn parse_text(self, text: &str) -> ParseOutcome {
        self.codec().parse_text(text)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Tests
// =============================================================================
