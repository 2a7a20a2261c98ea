//! Project Module
//!
//! Collections of subtitle documents grouped by language or track.

mod timed_text;

pub use timed_text::{TimedTextInfo, TimedTextObject};
