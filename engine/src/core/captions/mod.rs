//! Caption System Module
//!
//! Provides the subtitle text layer of SubTypo:
//! - Time codes (`HH:MM:SS,mmm`) and cues
//! - Format codecs (SubRip) behind a small registry
//! - Time-range queries for playback sync
//! - Editor field validation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caption System                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  timecode.rs   - Millisecond time values and their text form    │
//! │  models.rs     - Cue (start, end, text)                         │
//! │  formats.rs    - Codec trait, FormatKind registry, parse output │
//! │  subrip.rs     - SubRip parsing and export                      │
//! │  query.rs      - Cues active at a playback position             │
//! │  validation.rs - Editor field checks                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use subtypo_lib::core::captions::{find_cues_at, FormatKind};
//!
//! let outcome = FormatKind::SubRip.parse_text(&content);
//! let cues = outcome.into_result()?;
//! let visible = find_cues_at(&cues, 12_500);
//! ```

mod formats;
mod models;
mod query;
mod subrip;
mod timecode;
mod validation;

// Re-export models
pub use models::Cue;
pub use timecode::TimeCode;

// Re-export format types
pub use formats::{FormatKind, ParseOutcome, SubtitleFormat, SyntaxError};
pub use subrip::SubRipFormat;

pub use query::{cues_at, find_cues_at, first_cue_index_at, index_for_new_cue};
pub use validation::{
    check_name, check_text, check_time, check_time_range, is_cue_modified, ValidationResult,
    EMPTY_NAME_MESSAGE, EMPTY_TEXT_MESSAGE, INVALID_TIME_MESSAGE, TIME_RANGE_MESSAGE,
};
