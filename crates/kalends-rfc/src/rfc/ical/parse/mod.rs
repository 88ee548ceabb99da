//! iCalendar parsing primitives (RFC 5545).
//!
//! This module provides parsers for iCalendar content:
//! - Reader: Streaming line unfolding into logical lines
//! - Lexer: Content line parsing (the property codec's read half)
//! - Values: Text unescaping and value parsing (DATE-TIME, DURATION, RECUR)
//! - Parser: The component tree builder

mod error;
mod lexer;
mod parser;
mod reader;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::parse_content_line;
pub use parser::{CalendarParser, parse, parse_str};
pub use reader::{LineReader, LogicalLine};
pub use values::{parse_date, parse_duration, parse_rrule, parse_timestamp, unescape_text};
