//! SubTypo Core Library
//!
//! Subtitle document engine for a video subtitle editor.
//! This library contains the SubRip codec, the editable cue document with
//! snapshot-based undo/redo, time-range queries used for playback sync,
//! and the per-project collection of subtitle tracks.
//!
//! The engine is synchronous and single-threaded. It opens no files and
//! installs no logging subscriber; callers own I/O and observability setup.

pub mod core;

pub use crate::core::{
    captions::{Cue, FormatKind, ParseOutcome, SubtitleFormat, SyntaxError, TimeCode},
    document::{CueChange, EditResult, Subtitle},
    project::{TimedTextInfo, TimedTextObject},
    settings::EngineSettings,
    CoreError, CoreResult,
};
