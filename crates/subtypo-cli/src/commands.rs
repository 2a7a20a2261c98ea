//! Command Handlers
//!
//! Each handler reads its input, runs the engine and returns a serializable
//! report. Printing is left to `main`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use subtypo_lib::core::captions::TimeCode;
use subtypo_lib::{CoreError, EngineSettings, FormatKind, Subtitle};
use tracing::{debug, info};

use crate::config::{atomic_write_bytes, SettingsManager};

// =============================================================================
// Reports
// =============================================================================

/// A syntax error with a 1-based line number
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub line: usize,
    pub message: String,
}

/// Result of `check`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub file: String,
    pub format: String,
    pub cue_count: usize,
    pub errors: Vec<ReportedError>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A cue as shown by `at`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCue {
    /// 1-based caption number
    pub number: usize,
    pub start_time: String,
    pub end_time: String,
    pub text: String,
}

/// Result of `at`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtReport {
    pub position: String,
    pub cues: Vec<ActiveCue>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Picks the format from the file extension, or the configured default
fn format_for(path: &Path, settings: &EngineSettings) -> Result<FormatKind> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => Ok(FormatKind::from_extension(ext)?),
        None => Ok(settings.default_format_kind()),
    }
}

fn read_subtitle_text(path: &Path, settings: &EngineSettings) -> Result<String> {
    let limit = settings.import.max_file_size_bytes;
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    if size > limit as u64 {
        return Err(CoreError::FileTooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            limit,
        }
        .into());
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn subtitle_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn load_subtitle(path: &Path, settings: &EngineSettings) -> Result<Subtitle> {
    let format = format_for(path, settings)?;
    let text = read_subtitle_text(path, settings)?;
    settings
        .import_subtitle(&subtitle_name(path), format, &text)
        .with_context(|| format!("Failed to import {}", path.display()))
}

// =============================================================================
// Commands
// =============================================================================

/// Parses a file and reports every syntax error
pub fn check(path: &Path, settings: &EngineSettings) -> Result<CheckReport> {
    let format = format_for(path, settings)?;
    let text = read_subtitle_text(path, settings)?;
    let outcome = format.parse_text(&text);

    info!(
        "Checked {}: {} cues, {} errors",
        path.display(),
        outcome.cues.len(),
        outcome.errors.len()
    );

    Ok(CheckReport {
        file: path.display().to_string(),
        format: format.name().to_string(),
        cue_count: outcome.cues.len(),
        errors: outcome
            .errors
            .iter()
            .map(|error| ReportedError {
                line: error.line_number + 1,
                message: error.message.clone(),
            })
            .collect(),
    })
}

/// Re-serializes a file in canonical form
///
/// Writes to `output` when given and returns the text either way.
pub fn format(path: &Path, output: Option<&Path>, settings: &EngineSettings) -> Result<String> {
    let subtitle = load_subtitle(path, settings)?;
    let text = subtitle.to_text();

    if let Some(output) = output {
        atomic_write_bytes(output, text.as_bytes())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote {} cues to {}", subtitle.len(), output.display());
    }

    Ok(text)
}

/// Lists the cues visible at a time code
pub fn at(path: &Path, time: &str, settings: &EngineSettings) -> Result<AtReport> {
    let position = TimeCode::parse(time.trim())?;
    let subtitle = load_subtitle(path, settings)?;

    let cues: Vec<ActiveCue> = subtitle
        .cues_at(position.as_millis())
        .map(|(index, cue)| ActiveCue {
            number: index + 1,
            start_time: cue.start_time.to_text(),
            end_time: cue.end_time.to_text(),
            text: cue.text.clone(),
        })
        .collect();

    debug!(position = %position, active = cues.len(), "Queried cues");

    Ok(AtReport {
        position: position.to_text(),
        cues,
    })
}

/// Shows the current settings, or resets them first
pub fn config(manager: &SettingsManager, reset: bool) -> Result<EngineSettings> {
    if reset {
        return manager.reset().context("Failed to reset settings");
    }
    Ok(manager.load())
}

// =============================================================================
// Text Rendering
// =============================================================================

pub fn render_check(report: &CheckReport) -> String {
    if report.is_clean() {
        return format!(
            "{}: OK ({} cues, {})",
            report.file, report.cue_count, report.format
        );
    }

    let mut lines = vec![format!(
        "{}: {} error(s), {} cues recovered",
        report.file,
        report.errors.len(),
        report.cue_count
    )];
    lines.extend(
        report
            .errors
            .iter()
            .map(|error| format!("  line {}: {}", error.line, error.message)),
    );
    lines.join("\n")
}

pub fn render_at(report: &AtReport) -> String {
    if report.cues.is_empty() {
        return format!("No cues at {}", report.position);
    }

    report
        .cues
        .iter()
        .map(|cue| {
            format!(
                "{}\n{} --> {}\n{}",
                cue.number, cue.start_time, cue.end_time, cue.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
