//! Destructive and Edge Case Tests
//!
//! These tests feed malformed subtitle text, hostile time codes and
//! boundary indices through the engine to make sure nothing panics and
//! every failure is reported the documented way.

use crate::core::captions::{check_text, check_time, find_cues_at, Cue, FormatKind, TimeCode};
use crate::core::document::Subtitle;
use crate::core::project::{TimedTextInfo, TimedTextObject};
use crate::core::{CoreError, MAX_STATES_SIZE};

fn parse(text: &str) -> crate::core::captions::ParseOutcome {
    FormatKind::SubRip.parse_text(text)
}

#[test]
fn test_destructive_time_code_inputs() {
    for text in [
        "",
        " ",
        "-00:00:01,000",
        "00:00:01.000",
        "0:00:01,000",
        "00:00:01,0000",
        "00:00:01,00",
        "00:00:60,000",
        "00:60:00,000",
        "100:00:00,000",
        "00:00:00:000",
        "00:00,000",
        "00:00:00,000,000",
        "0a:00:00,000",
        "+1:00:00,000",
        "\u{0661}\u{0661}:00:00,000",
        "00:00:00,\u{0661}00",
    ] {
        assert!(TimeCode::parse(text).is_err(), "accepted {:?}", text);
        assert!(!check_time(text).is_valid(), "validated {:?}", text);
    }
}

#[test]
fn test_destructive_time_code_extremes() {
    assert_eq!(TimeCode::parse("99:59:59,999").unwrap(), TimeCode::MAX);
    assert_eq!(TimeCode::parse("00:00:00,000").unwrap(), TimeCode::ZERO);

    let huge = TimeCode::from_millis(u64::MAX);
    assert!(TimeCode::parse(&huge.to_text()).is_err());
    assert_eq!(huge.saturating_add_ms(1), huge);
}

#[test]
fn test_destructive_garbage_only_input() {
    let outcome = parse("hello world\nthis is not a subtitle");

    assert!(outcome.cues.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line_number, 0);
}

#[test]
fn test_destructive_whitespace_only_input() {
    let outcome = parse(" \n\t\n\r\n  ");

    assert!(outcome.cues.is_empty());
    assert!(outcome.is_clean());
}

#[test]
fn test_destructive_overflowing_caption_number() {
    let outcome = parse("99999999999999999999999\n00:00:01,000 --> 00:00:02,000\nText");

    assert!(outcome.cues.is_empty());
    assert_eq!(outcome.errors.len(), 1);
}

#[test]
fn test_destructive_number_line_at_eof() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\nText\n\n2");

    assert_eq!(outcome.cues.len(), 1);
    assert_eq!(outcome.errors.len(), 1);
    // Reported on the dangling number line, which is the file's last line.
    assert_eq!(outcome.errors[0].line_number, 4);
}

#[test]
fn test_destructive_blank_line_between_number_and_times() {
    let outcome = parse("1\n\n00:00:01,000 --> 00:00:02,000\nText\n");

    // The orphaned time-code line is recovered as its own block.
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(outcome.errors[0].line_number, 1);
    assert_eq!(outcome.errors[1].line_number, 2);
    assert_eq!(outcome.cues.len(), 1);
    assert_eq!(outcome.cues[0].text, "Text");
}

#[test]
fn test_destructive_repeated_separator() {
    let outcome = parse(concat!(
        "1\n00:00:01,000 --> 00:00:02,000 --> 00:00:03,000\nText\n\n",
        "2\n00:00:04,000 --> 00:00:05,000\nOk",
    ));

    assert_eq!(outcome.cues.len(), 1);
    assert_eq!(outcome.cues[0].text, "Ok");
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line_number, 1);
}

#[test]
fn test_destructive_out_of_order_times_are_kept() {
    let outcome = parse("1\n00:00:05,000 --> 00:00:01,000\nBackwards");

    assert!(outcome.is_clean());
    assert!(!outcome.cues[0].is_time_ordered());
    assert_eq!(outcome.cues[0].duration_ms(), 0);
}

#[test]
fn test_destructive_import_policy_is_all_or_nothing() {
    let text = "1\n00:00:01,000 --> 00:00:02,000\nGood\n\n2\n00:61:00,000 --> 00:62:00,000\nBad";

    let outcome = parse(text);
    assert_eq!(outcome.cues.len(), 1);

    let err = outcome.into_result().unwrap_err();
    assert!(matches!(err, CoreError::SubtitleImportFailed { .. }));
    assert_eq!(err.syntax_errors().len(), 1);
}

#[test]
fn test_destructive_boundary_indices() {
    let mut subtitle = Subtitle::new("Edge", FormatKind::SubRip);

    assert!(subtitle.remove_cue(0).is_err());
    assert!(subtitle.swap_cues(0, 0).is_err());
    assert!(subtitle.replace_cue(usize::MAX, Cue::default()).is_err());
    assert!(subtitle.insert_cue(usize::MAX, Cue::default()).is_err());
    assert!(subtitle.insert_cue(0, Cue::default()).is_ok());
    assert_eq!(subtitle.len(), 1);
}

#[test]
fn test_destructive_undo_storm() {
    let mut subtitle = Subtitle::new("Edge", FormatKind::SubRip);

    for _ in 0..100 {
        assert!(subtitle.undo().is_none());
        assert!(subtitle.redo().is_none());
    }
    assert_eq!(subtitle.generation(), 0);

    for n in 0..(MAX_STATES_SIZE as u64 * 3) {
        subtitle.push_cue(Cue::from_millis(n, n + 1, "x"));
        subtitle.undo();
        subtitle.redo();
    }
    assert!(subtitle.history().len() <= MAX_STATES_SIZE);
    assert_eq!(subtitle.len(), MAX_STATES_SIZE * 3);
}

#[test]
fn test_destructive_swap_same_index_is_recorded() {
    let mut subtitle =
        Subtitle::with_cues("Edge", FormatKind::SubRip, vec![Cue::from_millis(0, 1, "a")]);

    subtitle.swap_cues(0, 0).unwrap();
    assert!(subtitle.can_undo());
    assert_eq!(subtitle.cues(), &[Cue::from_millis(0, 1, "a")]);
}

#[test]
fn test_destructive_query_extremes() {
    let cues = vec![
        Cue::new(TimeCode::ZERO, TimeCode::from_millis(u64::MAX), "everything"),
        Cue::from_millis(10, 5, "inverted"),
    ];

    assert_eq!(find_cues_at(&cues, 0).len(), 1);
    assert_eq!(find_cues_at(&cues, u64::MAX).len(), 1);
    assert_eq!(find_cues_at(&cues, 7).len(), 1);
}

#[test]
fn test_destructive_text_validation() {
    assert!(!check_text("\n").is_valid());
    assert!(!check_text("line\n \t").is_valid());
    assert!(check_text("  indented").is_valid());
}

#[test]
fn test_destructive_empty_collection_operations() {
    let mut collection =
        TimedTextObject::new(TimedTextInfo::new("Empty", "und", FormatKind::SubRip));

    assert!(collection.selection().is_none());
    assert!(collection.selected_mut().is_none());
    assert!(collection.select(0).is_err());
    assert!(collection.remove_subtitle_at(0).is_err());
    assert!(matches!(
        collection.remove_subtitle("missing"),
        Err(CoreError::SubtitleNotFound(_))
    ));
    assert!(collection.is_name_available("", None));
}

#[test]
fn test_destructive_unknown_extension() {
    assert!(matches!(
        FormatKind::from_extension(".ass"),
        Err(CoreError::UnsupportedFormat(_))
    ));
    assert!(FormatKind::from_extension("").is_err());
}
