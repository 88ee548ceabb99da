//! Formatting of DATE, DATE-TIME and DURATION values.
//!
//! Parsing lives in `parse::values`; these are the inverses used by the
//! typed setters.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC basic format, `YYYYMMDDTHHMMSSZ`.
pub const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Date-only basic format, `YYYYMMDD`.
pub const DATE_FORMAT: &str = "%Y%m%d";

const DAY: u64 = 86_400;
const WEEK: u64 = 7 * DAY;

/// Formats a timestamp as a UTC DATE-TIME.
#[must_use]
pub fn format_utc(t: DateTime<Utc>) -> String {
    t.format(UTC_FORMAT).to_string()
}

/// Formats the date part of a timestamp as a DATE.
#[must_use]
pub fn format_date(t: DateTime<Utc>) -> String {
    t.format(DATE_FORMAT).to_string()
}

/// Formats a delta as a DURATION (RFC 5545 §3.3.6).
///
/// Whole weeks use the `nW` form. Sub-second precision is dropped.
#[must_use]
pub fn format_duration(d: TimeDelta) -> String {
    let sign = if d < TimeDelta::zero() { "-" } else { "" };
    let total = d.num_seconds().unsigned_abs();

    if total == 0 {
        return "PT0S".to_string();
    }

    if total % WEEK == 0 {
        return format!("{sign}P{}W", total / WEEK);
    }

    let days = total / DAY;
    let hours = (total % DAY) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut out = format!("{sign}P");
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours + minutes + seconds > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_and_date() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_utc(t), "20240305T070809Z");
        assert_eq!(format_date(t), "20240305");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(TimeDelta::zero()), "PT0S");
        assert_eq!(format_duration(TimeDelta::hours(1)), "PT1H");
        assert_eq!(format_duration(TimeDelta::weeks(2)), "P2W");
        assert_eq!(format_duration(TimeDelta::minutes(-15)), "-PT15M");
        assert_eq!(
            format_duration(TimeDelta::days(1) + TimeDelta::minutes(30) + TimeDelta::seconds(5)),
            "P1DT30M5S"
        );
        assert_eq!(format_duration(TimeDelta::days(3)), "P3D");
    }
}
