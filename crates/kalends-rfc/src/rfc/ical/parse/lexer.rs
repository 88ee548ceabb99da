//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Splits one logical line into name, parameters and raw value.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// The name and parameter names keep the case they were written in. The value
/// is returned raw; unescaping is up to the property layer, which knows the
/// value type.
///
/// ## Errors
/// Returns `MissingColon` if no `:` appears outside a quoted parameter value,
/// and `MissingPropertyName` if the name is empty.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let colon = find_unquoted(line, b':')
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_num).with_context(line))?;

    let head = &line[..colon];
    let raw_value = &line[colon + 1..];

    let mut segments = split_unquoted(head, b';').into_iter();
    let name = segments.next().unwrap_or_default();
    if name.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MissingPropertyName, line_num).with_context(line));
    }

    let params = segments.filter(|s| !s.is_empty()).map(parse_parameter).collect();

    Ok(ContentLine {
        name: name.to_string(),
        params,
        raw_value: raw_value.to_string(),
    })
}

/// Parses one `KEY=V1,V2` parameter declaration.
///
/// A declaration without `=` yields a parameter with no values.
fn parse_parameter(segment: &str) -> Parameter {
    let Some((name, list)) = segment.split_once('=') else {
        return Parameter::with_values(segment, Vec::new());
    };

    let values = split_param_values(list)
        .into_iter()
        .map(decode_param_value)
        .collect();

    Parameter::with_values(name, values)
}

/// Returns the byte offset of the first `needle` outside double quotes.
fn find_unquoted(s: &str, needle: u8) -> Option<usize> {
    let mut quoted = false;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'"' => quoted = !quoted,
            _ if b == needle && !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

/// Splits on `sep` wherever it appears outside double quotes.
fn split_unquoted(s: &str, sep: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'"' => quoted = !quoted,
            _ if b == sep && !quoted => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Splits a parameter value list on commas that are neither quoted nor
/// escaped with a backslash.
fn split_param_values(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if !quoted => escaped = true,
            b'"' => quoted = !quoted,
            b',' if !quoted => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Strips surrounding quotes and decodes RFC 6868 caret escapes.
///
/// An unquoted value may carry `\,` for a literal comma.
fn decode_param_value(raw: &str) -> String {
    if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
    {
        return decode_caret(inner);
    }
    decode_caret(&raw.replace("\\,", ","))
}

fn decode_caret(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                out.push('^');
                chars.next();
            }
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('\'') => {
                out.push('"');
                chars.next();
            }
            // Not a caret escape, keep as-is
            _ => out.push('^'),
        }
    }
    out
}
