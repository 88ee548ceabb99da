//! Tests for iCalendar parse errors.

use super::*;

#[test]
fn test_parse_error_new() {
    let error = ParseError::new(ParseErrorKind::UnexpectedEof, 10);
    assert_eq!(error.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(error.line, 10);
    assert!(error.context.is_none());
}

#[test]
fn test_parse_error_display_with_context() {
    let error =
        ParseError::new(ParseErrorKind::MismatchedEnd, 5).with_context("expected END:VEVENT");
    let display = format!("{error}");
    assert!(display.contains("mismatched BEGIN/END"));
    assert!(display.contains("line 5"));
    assert!(display.contains("expected END:VEVENT"));
}

#[test]
fn test_structural_kinds_are_malformed() {
    for kind in [
        ParseErrorKind::MissingCalendarBegin,
        ParseErrorKind::MismatchedEnd,
        ParseErrorKind::NestedCalendar,
        ParseErrorKind::InvalidNesting,
        ParseErrorKind::MissingColon,
        ParseErrorKind::MissingPropertyName,
        ParseErrorKind::UnexpectedEof,
    ] {
        assert!(kind.is_malformed(), "{kind:?} should be malformed");
        assert!(!kind.is_state_error());
    }
}

#[test]
fn test_state_and_value_kinds_are_not_malformed() {
    assert!(ParseErrorKind::InvalidState.is_state_error());
    assert!(!ParseErrorKind::InvalidState.is_malformed());

    for kind in [
        ParseErrorKind::InvalidDateTime,
        ParseErrorKind::InvalidDuration,
        ParseErrorKind::InvalidRRule,
        ParseErrorKind::InvalidFrequency,
        ParseErrorKind::InvalidWeekday,
    ] {
        assert!(!kind.is_malformed(), "{kind:?} should not be malformed");
    }
}

#[test]
fn test_eof_message() {
    assert_eq!(ParseErrorKind::UnexpectedEof.to_string(), "ran out of lines");
}

#[test]
fn test_parse_error_is_error_trait() {
    let error = ParseError::new(ParseErrorKind::MissingColon, 2);
    let _: &dyn std::error::Error = &error;
}
