//! Engine Settings
//!
//! Serializable engine configuration with defaults and normalization.
//! Persistence (file location, locking) belongs to the host application;
//! this module only defines the schema.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{
    captions::FormatKind, document::Subtitle, CoreResult, DEFAULT_CUE_DURATION_MS,
    MAX_FILE_SIZE, MAX_STATES_SIZE,
};

/// Settings schema version for migration support
pub const SETTINGS_VERSION: u32 = 1;

const MIN_HISTORY_STATES: usize = 2;
const MAX_HISTORY_STATES: usize = 500;
const MIN_CUE_DURATION_MS: u64 = 100;
const MAX_CUE_DURATION_MS: u64 = 60_000;
const MIN_IMPORT_SIZE: usize = 1024;
const MAX_IMPORT_SIZE: usize = 1024 * 1024 * 200;

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub import: ImportSettings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            history: HistorySettings::default(),
            editor: EditorSettings::default(),
            import: ImportSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Clamps out-of-range values and replaces unknown ones with defaults
    ///
    /// Never fails, so an old or hand-edited settings file still loads.
    pub fn normalize(&mut self) {
        self.version = SETTINGS_VERSION;

        self.history.max_states = clamp_logged(
            "history.maxStates",
            self.history.max_states,
            MIN_HISTORY_STATES,
            MAX_HISTORY_STATES,
        );
        self.editor.default_cue_duration_ms = clamp_logged(
            "editor.defaultCueDurationMs",
            self.editor.default_cue_duration_ms,
            MIN_CUE_DURATION_MS,
            MAX_CUE_DURATION_MS,
        );
        self.import.max_file_size_bytes = clamp_logged(
            "import.maxFileSizeBytes",
            self.import.max_file_size_bytes,
            MIN_IMPORT_SIZE,
            MAX_IMPORT_SIZE,
        );

        match FormatKind::from_extension(&self.editor.default_format) {
            Ok(kind) => self.editor.default_format = kind.extension().to_string(),
            Err(_) => {
                warn!(
                    "Unknown editor.defaultFormat '{}', using {}",
                    self.editor.default_format,
                    default_format()
                );
                self.editor.default_format = default_format();
            }
        }
    }

    /// Format for new documents; falls back to the default on unknown values
    pub fn default_format_kind(&self) -> FormatKind {
        FormatKind::from_extension(&self.editor.default_format).unwrap_or_default()
    }

    /// Creates an empty subtitle using the configured format and history depth
    pub fn new_subtitle(&self, name: &str) -> Subtitle {
        Subtitle::new(name, self.default_format_kind())
            .with_history_limit(self.history.max_states)
    }

    /// Imports subtitle text under the configured size limit and history depth
    pub fn import_subtitle(
        &self,
        name: &str,
        format: FormatKind,
        text: &str,
    ) -> CoreResult<Subtitle> {
        Subtitle::import(name, format, text, self.import.max_file_size_bytes)
            .map(|subtitle| subtitle.with_history_limit(self.history.max_states))
    }
}

fn clamp_logged<T>(name: &str, value: T, min: T, max: T) -> T
where
    T: Ord + Copy + std::fmt::Display,
{
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(
            "Setting {} out of range ({}), clamped to {}",
            name, value, clamped
        );
    }
    clamped
}

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistorySettings {
    /// Maximum snapshots kept per document
    #[serde(default = "default_max_states")]
    pub max_states: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_states: default_max_states(),
        }
    }
}

fn default_max_states() -> usize {
    MAX_STATES_SIZE
}

/// Editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    /// Duration given to a cue created at the playback position
    #[serde(default = "default_cue_duration")]
    pub default_cue_duration_ms: u64,

    /// Extension of the format used for new subtitles (e.g. ".srt")
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_cue_duration_ms: default_cue_duration(),
            default_format: default_format(),
        }
    }
}

fn default_cue_duration() -> u64 {
    DEFAULT_CUE_DURATION_MS
}

fn default_format() -> String {
    FormatKind::default().extension().to_string()
}

/// Import settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSettings {
    /// Largest subtitle text accepted by an import, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> usize {
    MAX_FILE_SIZE
}
