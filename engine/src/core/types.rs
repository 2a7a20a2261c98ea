//! SubTypo Core Type Definitions
//!
//! Defines identifiers and engine-wide limits shared across modules.

// =============================================================================
// ID Types
// =============================================================================

/// Subtitle document unique identifier (ULID)
pub type SubtitleId = String;

/// Time position in milliseconds, as reported by a video player
pub type PositionMs = u64;

// =============================================================================
// Limits
// =============================================================================

/// Maximum number of snapshots kept by a document's undo history
pub const MAX_STATES_SIZE: usize = 20;

/// Maximum accepted size of subtitle text handed to an import (20 MiB)
pub const MAX_FILE_SIZE: usize = 1024 * 1024 * 20;

/// Default duration given to a freshly created cue
pub const DEFAULT_CUE_DURATION_MS: u64 = 2000;

/// Generates a new unique subtitle identifier
pub fn new_subtitle_id() -> SubtitleId {
    ulid::Ulid::new().to_string()
}
