//! iCalendar RRULE (Recurrence Rule) value type (RFC 5545 §3.3.10, §3.8.5.3).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc, Weekday};
use serde::{Serialize, Serializer};

use super::datetime::format_utc;
use crate::rfc::ical::expand::SlotExpander;
use crate::rfc::ical::parse::{ParseError, parse_rrule};

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    #[default]
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the two-letter RFC 5545 code for a weekday.
#[must_use]
pub const fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Parses a two-letter weekday code (case-insensitive).
#[must_use]
pub fn weekday_from_code(s: &str) -> Option<Weekday> {
    Some(match s.to_ascii_uppercase().as_str() {
        "MO" => Weekday::Mon,
        "TU" => Weekday::Tue,
        "WE" => Weekday::Wed,
        "TH" => Weekday::Thu,
        "FR" => Weekday::Fri,
        "SA" => Weekday::Sat,
        "SU" => Weekday::Sun,
        _ => return None,
    })
}

/// BYDAY selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByDay {
    /// Plain weekdays, in declaration order.
    PlainDays(Vec<Weekday>),
    /// A signed ordinal weekday such as `-1FR` (last Friday).
    ///
    /// `rest` holds any plain weekdays declared after it.
    OrdinalDay {
        ordinal: i8,
        weekday: Weekday,
        rest: Vec<Weekday>,
    },
}

impl fmt::Display for ByDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, days) = match self {
            Self::PlainDays(days) => (None, days.as_slice()),
            Self::OrdinalDay {
                ordinal,
                weekday,
                rest,
            } => (Some(format!("{ordinal}{}", weekday_code(*weekday))), rest.as_slice()),
        };

        let codes = head
            .into_iter()
            .chain(days.iter().map(|d| weekday_code(*d).to_string()))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{codes}")
    }
}

/// Recurrence rule (RFC 5545 §3.3.10, §3.8.5.3).
///
/// Only the parts the expansion engine understands are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RRule {
    /// UID of the event the rule was read from. Empty for free-standing rules.
    pub event_id: String,
    pub frequency: Frequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_day: Option<ByDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Step between occurrences in units of `frequency` (default 1).
    pub interval: u32,
    /// Maximum number of occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Week start day (default Monday).
    pub week_start: Weekday,
}

impl Default for RRule {
    fn default() -> Self {
        Self {
            event_id: String::new(),
            frequency: Frequency::default(),
            by_day: None,
            by_month: None,
            until: None,
            interval: 1,
            count: None,
            week_start: Weekday::Mon,
        }
    }
}

impl RRule {
    /// Creates a rule with the given frequency and defaults for every other part.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    /// Tags the rule with the UID of its event.
    #[must_use]
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = event_id.into();
        self
    }

    /// Expands the rule for an event spanning `start..end` with the default
    /// fourteen-day horizon.
    ///
    /// See [`SlotExpander::expand`].
    #[must_use]
    pub fn get_slots(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
    ) -> Vec<RRuleSlot> {
        SlotExpander::default().expand(self, start, end, until)
    }
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.frequency)?;

        if let Some(until) = self.until {
            write!(f, ";UNTIL={}", format_utc(until))?;
        }
        if let Some(month) = self.by_month {
            write!(f, ";BYMONTH={month}")?;
        }
        if let Some(ref by_day) = self.by_day {
            write!(f, ";BYDAY={by_day}")?;
        }
        if self.week_start != Weekday::Mon {
            write!(f, ";WKST={}", weekday_code(self.week_start))?;
        }
        if self.interval > 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }

        Ok(())
    }
}

impl FromStr for RRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s, 0)
    }
}

/// One concrete occurrence produced by expanding a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RRuleSlot {
    pub event_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(rename = "duration_seconds", serialize_with = "serialize_seconds")]
    pub duration: TimeDelta,
}

impl RRuleSlot {
    #[must_use]
    pub fn new(event_id: impl Into<String>, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            event_id: event_id.into(),
            start_at,
            end_at,
            duration: end_at - start_at,
        }
    }
}

fn serialize_seconds<S: Serializer>(d: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(d.num_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_fixed_order() {
        let rule = RRule {
            until: Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
            by_month: Some(6),
            by_day: Some(ByDay::PlainDays(vec![Weekday::Mon, Weekday::Wed])),
            week_start: Weekday::Sun,
            ..RRule::new(Frequency::Weekly)
        };
        assert_eq!(
            rule.to_string(),
            "FREQ=WEEKLY;UNTIL=20240115T000000Z;BYMONTH=6;BYDAY=MO,WE;WKST=SU"
        );
    }

    #[test]
    fn display_omits_defaults() {
        assert_eq!(RRule::new(Frequency::Daily).to_string(), "FREQ=DAILY");
        assert_eq!(RRule::default().to_string(), "FREQ=YEARLY");
    }

    #[test]
    fn display_interval_and_count_last() {
        let rule = RRule {
            interval: 2,
            count: Some(10),
            ..RRule::new(Frequency::Daily)
        };
        assert_eq!(rule.to_string(), "FREQ=DAILY;INTERVAL=2;COUNT=10");
    }

    #[test]
    fn display_ordinal_by_day() {
        let by_day = ByDay::OrdinalDay {
            ordinal: -1,
            weekday: Weekday::Fri,
            rest: vec![Weekday::Mon],
        };
        assert_eq!(by_day.to_string(), "-1FR,MO");
    }

    #[test]
    fn from_str_matches_display() {
        let text = "FREQ=MONTHLY;UNTIL=20241231T000000Z;BYDAY=-1FR";
        let rule: RRule = text.parse().unwrap();
        assert_eq!(rule.to_string(), text);
    }

    #[test]
    fn weekday_codes() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(weekday_from_code(weekday_code(day)), Some(day));
        }
        assert_eq!(weekday_from_code("fr"), Some(Weekday::Fri));
        assert_eq!(weekday_from_code("XX"), None);
    }

    #[test]
    fn slot_duration() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let slot = RRuleSlot::new("e1", start, start + TimeDelta::minutes(45));
        assert_eq!(slot.duration, TimeDelta::minutes(45));
    }
}
