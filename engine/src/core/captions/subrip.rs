//! SubRip (.srt) Codec
//!
//! # SRT Format
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! First caption text
//!
//! 2
//! 00:00:05,500 --> 00:00:08,000
//! Second caption text
//! with multiple lines
//! ```
//!
//! Parsing never stops at the first problem. Each malformed block produces a
//! [`SyntaxError`] and scanning resumes at the next block, so a single pass
//! reports every error and recovers every well-formed cue.

use std::fmt::Write;

use tracing::{debug, warn};

use super::{Cue, ParseOutcome, SubtitleFormat, SyntaxError, TimeCode};

const TIME_CODE_SEPARATOR: &str = " --> ";

/// SubRip subtitle codec
#[derive(Clone, Copy, Debug, Default)]
pub struct SubRipFormat;

impl SubtitleFormat for SubRipFormat {
    fn name(&self) -> &'static str {
        "SubRip"
    }

    fn extension(&self) -> &'static str {
        ".srt"
    }

    fn to_text(&self, cues: &[Cue]) -> String {
        let mut output = String::new();

        for (index, cue) in cues.iter().enumerate() {
            let _ = write!(
                output,
                "{}\n{}{}{}\n{}\n\n",
                index + 1,
                cue.start_time,
                TIME_CODE_SEPARATOR,
                cue.end_time,
                cue.text
            );
        }

        output.truncate(output.trim_end().len());
        output
    }

    fn parse_text(&self, text: &str) -> ParseOutcome {
        let normalized = normalize_line_endings(text);
        let outcome = SubRipParser::new(&normalized).run();

        if outcome.is_clean() {
            debug!(cues = outcome.cues.len(), "Parsed SubRip text");
        } else {
            warn!(
                cues = outcome.cues.len(),
                errors = outcome.errors.len(),
                "SubRip text contains syntax errors"
            );
        }

        outcome
    }
}

/// Strips a leading byte order mark and converts CRLF / CR line endings to LF
fn normalize_line_endings(text: &str) -> String {
    text.strip_prefix('\u{FEFF}')
        .unwrap_or(text)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn parse_caption_number(line: &str) -> Option<u64> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    line.parse().ok()
}

fn parse_time_codes(line: &str) -> Result<(TimeCode, TimeCode), String> {
    let parts: Vec<&str> = line.split(TIME_CODE_SEPARATOR).collect();
    if parts.len() != 2 {
        return Err(format!("Invalid time code format: '{}'", line));
    }

    let start = parts[0].trim();
    let end = parts[1].trim();
    let start =
        TimeCode::parse(start).map_err(|_| format!("Invalid start time code: '{}'", start))?;
    let end = TimeCode::parse(end).map_err(|_| format!("Invalid end time code: '{}'", end))?;

    Ok((start, end))
}

// =============================================================================
// Block Parser
// =============================================================================

struct SubRipParser<'a> {
    lines: Vec<&'a str>,
    position: usize,
    expected_number: u64,
    outcome: ParseOutcome,
}

impl<'a> SubRipParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            position: 0,
            expected_number: 1,
            outcome: ParseOutcome::default(),
        }
    }

    fn run(mut self) -> ParseOutcome {
        while let Some(header_index) = self.next_non_blank() {
            self.parse_block(header_index);
        }
        self.outcome
    }

    fn next_non_blank(&mut self) -> Option<usize> {
        while self.position < self.lines.len() {
            if !is_blank(self.lines[self.position]) {
                return Some(self.position);
            }
            self.position += 1;
        }
        None
    }

    /// Index one past the last non-blank line starting at `from`
    fn block_end(&self, from: usize) -> usize {
        let mut end = from;
        while end < self.lines.len() && !is_blank(self.lines[end]) {
            end += 1;
        }
        end
    }

    fn error(&mut self, message: impl Into<String>, line_number: usize) {
        self.outcome
            .errors
            .push(SyntaxError::new(message, line_number));
    }

    fn parse_block(&mut self, header_index: usize) {
        let header = self.lines[header_index].trim();
        let expected = self.expected_number;

        let (number, timing_index) = if let Some(number) = parse_caption_number(header) {
            if number != expected {
                self.error(
                    format!("Found number: {}, expected number: {}", number, expected),
                    header_index,
                );
            }
            (number, header_index + 1)
        } else if header.contains(TIME_CODE_SEPARATOR.trim()) {
            // Number line missing: the block still starts with its time codes.
            self.error(
                format!("Caption number not found, expected number: {}", expected),
                header_index,
            );
            (expected, header_index)
        } else {
            self.error(
                format!("Found text: '{}', expected number: {}", header, expected),
                header_index,
            );
            self.position = self.block_end(header_index);
            return;
        };

        // Count on from the number actually seen so a single gap is reported once.
        self.expected_number = number.saturating_add(1);

        if timing_index >= self.lines.len() {
            self.error("Unexpected end of file after caption number", header_index);
            self.position = timing_index;
            return;
        }

        let timing_line = self.lines[timing_index].trim();
        if timing_line.is_empty() {
            self.error("Time codes line not found", timing_index);
            self.position = timing_index;
            return;
        }

        let text_start = timing_index + 1;
        let text_end = self.block_end(text_start);
        self.position = text_end;

        match parse_time_codes(timing_line) {
            Ok((start, end)) => {
                let text = self.lines[text_start..text_end].join("\n");
                self.outcome.cues.push(Cue::new(start, end, text));
            }
            Err(message) => self.error(message, timing_index),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
