//! iCalendar document parser (RFC 5545).
//!
//! Builds the component tree from a stream of logical lines with a small
//! state machine for the calendar envelope and recursive descent for the
//! components inside it.

use std::io::BufRead;

use super::error::{ParseError, ParseErrorKind};
use super::lexer::parse_content_line;
use super::reader::LineReader;
use crate::error::RfcResult;
use crate::rfc::ical::core::{Calendar, Component, ComponentLike, ContentLine, Property};

/// Components nested deeper than this are rejected.
const MAX_NESTING_DEPTH: usize = 32;

const VCALENDAR: &str = "VCALENDAR";

/// Position of the builder within the calendar envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectVCalendarBegin,
    TopLevelProperties,
    ComponentsOrEnd,
    Done,
}

/// What a content line asks the builder to do.
#[derive(Debug)]
enum Directive {
    Begin(String),
    End(String),
    Property(ContentLine),
}

impl From<ContentLine> for Directive {
    fn from(cl: ContentLine) -> Self {
        if cl.name.eq_ignore_ascii_case("BEGIN") {
            Self::Begin(cl.raw_value.trim().to_string())
        } else if cl.name.eq_ignore_ascii_case("END") {
            Self::End(cl.raw_value.trim().to_string())
        } else {
            Self::Property(cl)
        }
    }
}

fn is_calendar(token: &str) -> bool {
    token.eq_ignore_ascii_case(VCALENDAR)
}

/// Single-use parser over one iCalendar stream.
///
/// Any structural error aborts the whole document; no partial calendar is
/// ever returned.
#[derive(Debug)]
pub struct CalendarParser<R> {
    lines: LineReader<R>,
    state: ParseState,
    calendar: Calendar,
    last_line: usize,
}

impl<R: BufRead> CalendarParser<R> {
    /// Creates a parser reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            state: ParseState::ExpectVCalendarBegin,
            calendar: Calendar::empty(),
            last_line: 0,
        }
    }

    /// Consumes the stream up to `END:VCALENDAR` and returns the calendar.
    ///
    /// Anything after `END:VCALENDAR` is left unread.
    ///
    /// ## Errors
    /// Returns an I/O error if reading fails, or a parse error for grammar
    /// violations and streams that end before `END:VCALENDAR`.
    pub fn parse(mut self) -> RfcResult<Calendar> {
        while self.state != ParseState::Done {
            let Some((number, cl)) = self.next_content_line()? else {
                return Err(ParseError::new(ParseErrorKind::UnexpectedEof, self.last_line)
                    .with_context("missing END:VCALENDAR")
                    .into());
            };
            self.step(number, cl)?;
        }
        Ok(self.calendar)
    }

    /// Applies one top-level line to the envelope state machine.
    fn step(&mut self, number: usize, cl: ContentLine) -> RfcResult<()> {
        use ParseState::{ComponentsOrEnd, Done, ExpectVCalendarBegin, TopLevelProperties};

        self.state = match (self.state, Directive::from(cl)) {
            (ExpectVCalendarBegin, Directive::Begin(token)) if is_calendar(&token) => {
                tracing::trace!(line = number, "Entered VCALENDAR");
                TopLevelProperties
            }
            (ExpectVCalendarBegin, directive) => {
                return Err(ParseError::new(ParseErrorKind::MissingCalendarBegin, number)
                    .with_context(describe(&directive))
                    .into());
            }
            (TopLevelProperties | ComponentsOrEnd, Directive::End(token)) if is_calendar(&token) => Done,
            (TopLevelProperties | ComponentsOrEnd, Directive::End(token)) => {
                return Err(ParseError::new(ParseErrorKind::MismatchedEnd, number)
                    .with_context(format!("expected END:{VCALENDAR}, got END:{token}"))
                    .into());
            }
            (TopLevelProperties | ComponentsOrEnd, Directive::Begin(token)) if is_calendar(&token) => {
                return Err(ParseError::new(ParseErrorKind::NestedCalendar, number).into());
            }
            (TopLevelProperties | ComponentsOrEnd, Directive::Begin(token)) => {
                let component = self.parse_component(&token, number, 1)?;
                self.calendar.add_component(component);
                ComponentsOrEnd
            }
            (state @ (TopLevelProperties | ComponentsOrEnd), Directive::Property(cl)) => {
                self.calendar.add_property(Property::from_content_line(cl));
                state
            }
            (Done, _) => {
                return Err(ParseError::new(ParseErrorKind::InvalidState, number)
                    .with_context("line after END:VCALENDAR")
                    .into());
            }
        };
        Ok(())
    }

    /// Parses the body of a component whose BEGIN line was just consumed.
    fn parse_component(&mut self, token: &str, begin_line: usize, depth: usize) -> RfcResult<Component> {
        if depth > MAX_NESTING_DEPTH {
            return Err(ParseError::new(ParseErrorKind::InvalidNesting, begin_line)
                .with_context(format!("{token} exceeds depth {MAX_NESTING_DEPTH}"))
                .into());
        }

        tracing::trace!(line = begin_line, component = %token, depth, "Parsing component");
        let mut component = Component::from_token(token);

        loop {
            let Some((number, cl)) = self.next_content_line()? else {
                return Err(ParseError::new(ParseErrorKind::UnexpectedEof, self.last_line)
                    .with_context(format!("missing END:{token}"))
                    .into());
            };

            match Directive::from(cl) {
                Directive::Begin(nested) if is_calendar(&nested) => {
                    return Err(ParseError::new(ParseErrorKind::NestedCalendar, number).into());
                }
                Directive::Begin(nested) => {
                    let child = self.parse_component(&nested, number, depth + 1)?;
                    component.add_component(child);
                }
                Directive::End(end) if end.eq_ignore_ascii_case(token) => return Ok(component),
                Directive::End(end) => {
                    return Err(ParseError::new(ParseErrorKind::MismatchedEnd, number)
                        .with_context(format!("expected END:{token}, got END:{end}"))
                        .into());
                }
                Directive::Property(cl) => component.add_property(Property::from_content_line(cl)),
            }
        }
    }

    fn next_content_line(&mut self) -> RfcResult<Option<(usize, ContentLine)>> {
        let Some(line) = self.lines.read_line()? else {
            return Ok(None);
        };
        self.last_line = line.number;
        let cl = parse_content_line(&line.text, line.number)?;
        Ok(Some((line.number, cl)))
    }
}

fn describe(directive: &Directive) -> String {
    match directive {
        Directive::Begin(token) => format!("found BEGIN:{token}"),
        Directive::End(token) => format!("found END:{token}"),
        Directive::Property(cl) => format!("found property {}", cl.name),
    }
}

/// Parses one iCalendar document from a buffered reader.
///
/// ## Errors
/// Returns an error if reading fails or the input is not a well-formed
/// calendar.
#[tracing::instrument(skip_all)]
pub fn parse<R: BufRead>(reader: R) -> RfcResult<Calendar> {
    tracing::debug!("Parsing iCalendar document");

    let calendar = CalendarParser::new(reader).parse().inspect_err(|e| {
        tracing::debug!(error = %e, "iCalendar document rejected");
    })?;

    tracing::debug!(
        properties = calendar.properties().len(),
        components = calendar.components().len(),
        "iCalendar document parsed successfully"
    );
    Ok(calendar)
}

/// Parses one iCalendar document held in memory.
///
/// ## Errors
/// Returns an error if the input is not a well-formed calendar.
pub fn parse_str(input: &str) -> RfcResult<Calendar> {
    parse(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RfcError;
    use crate::rfc::ical::core::ComponentKind;

    fn parse_err(input: &str) -> ParseError {
        match parse_str(input) {
            Err(RfcError::Parse(e)) => e,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test_log::test]
    fn minimal_calendar() {
        let cal = parse_str("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n").unwrap();
        assert_eq!(cal.get_property_string("VERSION").as_deref(), Some("2.0"));
        assert!(cal.components().is_empty());
    }

    #[test]
    fn leading_blank_lines_are_ignored() {
        let cal = parse_str("\r\n\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();
        assert!(cal.properties().is_empty());
    }

    #[test]
    fn nested_components() {
        let input = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:1\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Paris\r\n\
BEGIN:STANDARD\r\n\
TZOFFSETTO:+0100\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
END:VCALENDAR\r\n";
        let cal = parse_str(input).unwrap();
        let kinds: Vec<_> = cal.components().iter().map(Component::kind).collect();
        assert_eq!(kinds, vec![ComponentKind::Event, ComponentKind::Timezone]);

        let events = cal.events();
        let event = events[0];
        assert_eq!(event.components().len(), 1);
        assert_eq!(event.components()[0].kind(), ComponentKind::Alarm);

        let tz = cal.time_zone().unwrap();
        assert_eq!(tz.value().as_deref(), Some("Europe/Paris"));
        assert_eq!(tz.components()[0].kind(), ComponentKind::Standard);
    }

    #[test]
    fn begin_end_are_case_insensitive() {
        let cal = parse_str("begin:vcalendar\r\nBEGIN:vevent\r\nEND:VEVENT\r\nEnd:VCalendar\r\n").unwrap();
        assert_eq!(cal.events().len(), 1);
    }

    #[test]
    fn properties_after_components_are_kept() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VEVENT\r\nX-LATE:1\r\nEND:VCALENDAR\r\n";
        let cal = parse_str(input).unwrap();
        assert_eq!(cal.get_property_string("X-LATE").as_deref(), Some("1"));
    }

    #[test]
    fn trailing_content_is_not_read() {
        let cal = parse_str("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\ngarbage without colon\r\n").unwrap();
        assert!(cal.components().is_empty());
    }

    #[test]
    fn missing_calendar_begin() {
        let err = parse_err("BEGIN:VEVENT\r\nEND:VEVENT\r\n");
        assert_eq!(err.kind, ParseErrorKind::MissingCalendarBegin);
        assert_eq!(err.line, 1);
        assert!(err.is_malformed());
    }

    #[test]
    fn property_before_begin() {
        let err = parse_err("VERSION:2.0\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
        assert_eq!(err.kind, ParseErrorKind::MissingCalendarBegin);
    }

    #[test]
    fn mismatched_end_in_component() {
        let err = parse_err("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VTODO\r\nEND:VCALENDAR\r\n");
        assert_eq!(err.kind, ParseErrorKind::MismatchedEnd);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn mismatched_end_at_top_level() {
        let err = parse_err("BEGIN:VCALENDAR\r\nEND:VEVENT\r\n");
        assert_eq!(err.kind, ParseErrorKind::MismatchedEnd);
    }

    #[test]
    fn nested_calendar() {
        let err = parse_err("BEGIN:VCALENDAR\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nEND:VCALENDAR\r\n");
        assert_eq!(err.kind, ParseErrorKind::NestedCalendar);

        let err = parse_err("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nBEGIN:VCALENDAR\r\n");
        assert_eq!(err.kind, ParseErrorKind::NestedCalendar);
    }

    #[test]
    fn ran_out_of_lines() {
        let err = parse_err("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.line, 3);
        assert_eq!(err.context.as_deref(), Some("missing END:VEVENT"));
        assert!(err.to_string().contains("ran out of lines"));

        let err = parse_err("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn empty_input() {
        let err = parse_err("");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn line_without_colon_aborts() {
        let err = parse_err("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY Team\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n");
        assert_eq!(err.kind, ParseErrorKind::MissingColon);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn nesting_limit() {
        let mut input = String::from("BEGIN:VCALENDAR\r\n");
        for _ in 0..=MAX_NESTING_DEPTH {
            input.push_str("BEGIN:X-DEEP\r\n");
        }
        let err = parse_err(&input);
        assert_eq!(err.kind, ParseErrorKind::InvalidNesting);
    }

    #[test]
    fn invalid_utf8_is_io_error() {
        let input: &[u8] = b"BEGIN:VCALENDAR\r\nSUMMARY:\xFF\r\nEND:VCALENDAR\r\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, RfcError::Io(_)));
        assert!(!err.is_malformed());
    }
}
