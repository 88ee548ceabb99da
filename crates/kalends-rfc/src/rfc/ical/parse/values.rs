//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! Only the value types the engine interprets are decoded here. Everything
//! else stays as raw text on the property.
#![expect(
    clippy::map_err_ignore,
    reason = "chrono and integer parse errors carry nothing beyond the offending text"
)]

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc, Weekday};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ByDay, Frequency, RRule, weekday_from_code};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit calendar date.
pub fn parse_date(s: &str, line: usize) -> ParseResult<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_datetime(s, line));
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| invalid_datetime(s, line))
}

/// Parses a DATE or DATE-TIME value into a UTC timestamp.
///
/// Accepted forms:
/// - `YYYYMMDD` (midnight UTC)
/// - `YYYYMMDDTHHMMSSZ` (UTC)
/// - `YYYYMMDDTHHMMSS` (floating, read as UTC)
///
/// TZID parameters are never applied here.
///
/// ## Errors
/// Returns an error if the string matches none of the forms above.
pub fn parse_timestamp(s: &str, line: usize) -> ParseResult<DateTime<Utc>> {
    let s = s.trim();
    if !s.contains('T') {
        return Ok(parse_date(s, line)?.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    let local = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(local, "%Y%m%dT%H%M%S")
        .map(|dt| dt.and_utc())
        .map_err(|_| invalid_datetime(s, line))
}

fn invalid_datetime(s: &str, line: usize) -> ParseError {
    ParseError::new(ParseErrorKind::InvalidDateTime, line).with_context(format!("'{s}'"))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: `[+|-]P[nW]` or `[+|-]P[nD][T[nH][nM][nS]]`
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize) -> ParseResult<TimeDelta> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line).with_context(format!("'{s}'"));

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest.strip_prefix('P').ok_or_else(err)?;

    let mut total = TimeDelta::zero();
    let mut digits: Option<i64> = None;
    let mut in_time = false;
    let mut seen_component = false;
    let mut seen_time_component = false;

    for c in rest.chars() {
        if let Some(d) = c.to_digit(10) {
            let acc = digits.unwrap_or(0);
            digits = Some(
                acc.checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(d)))
                    .ok_or_else(err)?,
            );
            continue;
        }

        if c == 'T' {
            if in_time || digits.is_some() {
                return Err(err());
            }
            in_time = true;
            continue;
        }

        let n = digits.take().ok_or_else(err)?;
        let part = match (c, in_time) {
            ('W', false) => TimeDelta::try_weeks(n),
            ('D', false) => TimeDelta::try_days(n),
            ('H', true) => TimeDelta::try_hours(n),
            ('M', true) => TimeDelta::try_minutes(n),
            ('S', true) => TimeDelta::try_seconds(n),
            _ => None,
        }
        .ok_or_else(err)?;
        total = total.checked_add(&part).ok_or_else(err)?;
        seen_component = true;
        seen_time_component |= in_time;
    }

    if digits.is_some() || !seen_component || (in_time && !seen_time_component) {
        return Err(err());
    }

    Ok(if negative { -total } else { total })
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10).
///
/// Recognized keys are `FREQ`, `UNTIL`, `BYMONTH`, `BYDAY`, `WKST`,
/// `INTERVAL` and `COUNT`. Other keys are ignored. An empty `FREQ` means
/// yearly.
///
/// ## Errors
/// Returns an error if a recognized key carries a malformed value or a
/// segment lacks `=`.
pub fn parse_rrule(s: &str, line: usize) -> ParseResult<RRule> {
    let mut rrule = RRule::default();

    for part in s.split(';').filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line).with_context(format!("'{part}'"))
        })?;
        parse_rrule_part(&mut rrule, key, value, line)?;
    }

    Ok(rrule)
}

/// Parses a single RRULE key-value pair.
fn parse_rrule_part(rrule: &mut RRule, key: &str, value: &str, line: usize) -> ParseResult<()> {
    match key.to_ascii_uppercase().as_str() {
        "FREQ" => {
            rrule.frequency = if value.is_empty() {
                Frequency::Yearly
            } else {
                Frequency::parse(value).ok_or_else(|| {
                    ParseError::new(ParseErrorKind::InvalidFrequency, line)
                        .with_context(format!("'{value}'"))
                })?
            };
        }
        "UNTIL" => rrule.until = Some(parse_timestamp(value, line)?),
        "BYMONTH" => rrule.by_month = Some(parse_number(key, value, line)?),
        "BYDAY" => rrule.by_day = parse_byday(value, line)?,
        "WKST" => rrule.week_start = parse_weekday(value, line)?,
        "INTERVAL" => rrule.interval = parse_number(key, value, line)?,
        "COUNT" => rrule.count = Some(parse_number(key, value, line)?),
        _ => tracing::trace!(key, "Ignoring unsupported RRULE part"),
    }
    Ok(())
}

fn parse_number(key: &str, value: &str, line: usize) -> ParseResult<u32> {
    value.trim().parse().map_err(|_| {
        ParseError::new(ParseErrorKind::InvalidRRule, line).with_context(format!("{key}='{value}'"))
    })
}

fn parse_weekday(s: &str, line: usize) -> ParseResult<Weekday> {
    weekday_from_code(s.trim())
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line).with_context(format!("'{s}'")))
}

/// Parses a BYDAY value.
///
/// When the first entry carries a signed ordinal (e.g. `-1FR`, `+2MO`), it is
/// captured as an ordinal-qualified day and the remaining entries are read as
/// plain weekdays.
fn parse_byday(s: &str, line: usize) -> ParseResult<Option<ByDay>> {
    let mut tokens = s.split(',').map(str::trim).filter(|t| !t.is_empty());
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    let rest = tokens
        .map(|t| parse_weekday(t, line))
        .collect::<ParseResult<Vec<_>>>()?;

    if first.len() <= 2 {
        let mut days = vec![parse_weekday(first, line)?];
        days.extend(rest);
        return Ok(Some(ByDay::PlainDays(days)));
    }

    let split = first.len() - 2;
    let (Some(ordinal_str), Some(code)) = (first.get(..split), first.get(split..)) else {
        return Err(ParseError::new(ParseErrorKind::InvalidWeekday, line).with_context(format!("'{first}'")));
    };
    let weekday = parse_weekday(code, line)?;
    let ordinal: i8 = ordinal_str
        .parse()
        .ok()
        .filter(|n: &i8| *n != 0)
        .ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line).with_context(format!("BYDAY='{first}'"))
        })?;

    Ok(Some(ByDay::OrdinalDay {
        ordinal,
        weekday,
        rest,
    }))
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
