//! Time Codes
//!
//! Millisecond time values with the canonical SubRip text form `HH:MM:SS,mmm`.
//!
//! Parsing is strict: every field must have its exact width (2, 2, 2, 3)
//! and fall within its bound (hours 0-99, minutes and seconds 0-59,
//! milliseconds 0-999). The same predicate drives editor field validation
//! and format parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, CoreResult};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// A non-negative time value in milliseconds
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeCode(u64);

impl TimeCode {
    /// `00:00:00,000`
    pub const ZERO: TimeCode = TimeCode(0);

    /// `99:59:59,999`, the largest value with a two-digit hour field
    pub const MAX: TimeCode =
        TimeCode(99 * MS_PER_HOUR + 59 * MS_PER_MINUTE + 59 * MS_PER_SECOND + 999);

    /// Creates a time code from a millisecond count
    pub const fn from_millis(milliseconds: u64) -> Self {
        Self(milliseconds)
    }

    /// Returns the millisecond count
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Parses `HH:MM:SS,mmm` text
    pub fn parse(text: &str) -> CoreResult<Self> {
        parse_fields(text)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidTimeCode(text.to_string()))
    }

    /// Returns true if `text` is a valid `HH:MM:SS,mmm` time code
    pub fn is_valid(text: &str) -> bool {
        parse_fields(text).is_some()
    }

    /// Formats as `HH:MM:SS,mmm`
    ///
    /// Values above [`TimeCode::MAX`] render with a wider hour field and
    /// will not parse back.
    pub fn to_text(self) -> String {
        let hours = self.0 / MS_PER_HOUR;
        let minutes = (self.0 % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (self.0 % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = self.0 % MS_PER_SECOND;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Returns a new time code offset by `milliseconds`, saturating at `u64::MAX`
    pub fn saturating_add_ms(self, milliseconds: u64) -> Self {
        Self(self.0.saturating_add(milliseconds))
    }
}

fn parse_fields(text: &str) -> Option<u64> {
    let mut parts = text.split(':');
    let (hours, minutes, rest) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let (seconds, millis) = rest.split_once(',')?;

    let hours = parse_field(hours, 2, 99)?;
    let minutes = parse_field(minutes, 2, 59)?;
    let seconds = parse_field(seconds, 2, 59)?;
    let millis = parse_field(millis, 3, 999)?;

    Some(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
}

fn parse_field(field: &str, width: usize, max: u64) -> Option<u64> {
    if field.len() != width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u64>().ok().filter(|value| *value <= max)
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for TimeCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for TimeCode {
    fn from(milliseconds: u64) -> Self {
        Self::from_millis(milliseconds)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_code() {
        assert_eq!(TimeCode::parse("00:00:00,000").unwrap().as_millis(), 0);
        assert_eq!(TimeCode::parse("00:00:01,500").unwrap().as_millis(), 1_500);
        assert_eq!(TimeCode::parse("00:01:30,000").unwrap().as_millis(), 90_000);
        assert_eq!(TimeCode::parse("01:30:00,000").unwrap().as_millis(), 5_400_000);
        assert_eq!(TimeCode::parse("00:00:21,807").unwrap().as_millis(), 21_807);
        assert_eq!(TimeCode::parse("99:59:59,999").unwrap(), TimeCode::MAX);
    }

    #[test]
    fn test_format_time_code() {
        assert_eq!(TimeCode::ZERO.to_text(), "00:00:00,000");
        assert_eq!(TimeCode::from_millis(1_500).to_text(), "00:00:01,500");
        assert_eq!(TimeCode::from_millis(90_000).to_text(), "00:01:30,000");
        assert_eq!(TimeCode::from_millis(5_400_000).to_text(), "01:30:00,000");
        assert_eq!(TimeCode::MAX.to_string(), "99:59:59,999");
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        assert!(!TimeCode::is_valid("00:60:00,000"));
        assert!(!TimeCode::is_valid("00:00:60,000"));
        assert!(matches!(
            TimeCode::parse("00:60:00,000"),
            Err(CoreError::InvalidTimeCode(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_widths() {
        assert!(!TimeCode::is_valid("0:00:00,000"));
        assert!(!TimeCode::is_valid("000:00:00,000"));
        assert!(!TimeCode::is_valid("00:0:00,000"));
        assert!(!TimeCode::is_valid("00:00:0,000"));
        assert!(!TimeCode::is_valid("00:00:00,00"));
        assert!(!TimeCode::is_valid("00:00:00,0000"));
    }

    #[test]
    fn test_rejects_wrong_separators() {
        assert!(!TimeCode::is_valid("00:00:00.000"));
        assert!(!TimeCode::is_valid("00:00,00,000"));
        assert!(!TimeCode::is_valid("00:00:00:00,000"));
        assert!(!TimeCode::is_valid("00:00:00,000,1"));
        assert!(!TimeCode::is_valid(""));
        assert!(!TimeCode::is_valid(" 00:00:00,000"));
        assert!(!TimeCode::is_valid("aa:00:00,000"));
        assert!(!TimeCode::is_valid("+1:00:00,000"));
    }

    #[test]
    fn test_text_round_trip_across_range() {
        let max = TimeCode::MAX.as_millis();
        let mut ms = 0;
        while ms <= max {
            let code = TimeCode::from_millis(ms);
            assert_eq!(TimeCode::parse(&code.to_text()).unwrap(), code);
            ms += 1_000_003;
        }
        assert_eq!(TimeCode::parse(&TimeCode::MAX.to_text()).unwrap(), TimeCode::MAX);
    }

    #[test]
    fn test_from_str_and_add() {
        let start: TimeCode = "00:00:05,000".parse().unwrap();
        assert_eq!(start.saturating_add_ms(2_000).to_text(), "00:00:07,000");
        assert_eq!(
            TimeCode::from_millis(u64::MAX).saturating_add_ms(1).as_millis(),
            u64::MAX
        );
    }

    #[test]
    fn test_serializes_as_milliseconds() {
        let json = serde_json::to_string(&TimeCode::from_millis(1_234)).unwrap();
        assert_eq!(json, "1234");
        let parsed: TimeCode = serde_json::from_str("42").unwrap();
        assert_eq!(parsed.as_millis(), 42);
    }
}
