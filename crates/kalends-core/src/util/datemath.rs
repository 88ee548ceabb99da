//! Calendar arithmetic over UTC timestamps.
//!
//! ## Summary
//! Pure helpers used by recurrence expansion. Every function keeps the
//! time-of-day of its input and returns `None` only when the result would fall
//! outside the range `chrono` can represent.

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, Utc, Weekday};

/// Adds `n` days (may be negative).
#[must_use]
pub fn add_days(t: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
    t.checked_add_signed(TimeDelta::try_days(n)?)
}

/// Adds `n` weeks (may be negative).
#[must_use]
pub fn add_weeks(t: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
    t.checked_add_signed(TimeDelta::try_weeks(n)?)
}

/// Adds `n` calendar months (may be negative).
///
/// The day of month is clamped to the length of the target month, so
/// January 31st plus one month is the last day of February.
#[must_use]
pub fn add_months(t: DateTime<Utc>, n: i32) -> Option<DateTime<Utc>> {
    let months = Months::new(n.unsigned_abs());
    if n >= 0 {
        t.checked_add_months(months)
    } else {
        t.checked_sub_months(months)
    }
}

/// Returns the next date on or after `t` that falls on `weekday`.
///
/// When `inclusive` is false and `t` already falls on `weekday`, the result is
/// one week later.
#[must_use]
pub fn next_weekday(t: DateTime<Utc>, weekday: Weekday, inclusive: bool) -> Option<DateTime<Utc>> {
    let current = t.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let mut ahead = (target + 7 - current) % 7;
    if ahead == 0 && !inclusive {
        ahead = 7;
    }
    add_days(t, i64::from(ahead))
}

/// Returns the `n`th occurrence (1-based, counted from the start) of `weekday`
/// in the month containing `t`.
///
/// `None` when the month has fewer than `n` such weekdays.
#[must_use]
pub fn nth_weekday_of_month(t: DateTime<Utc>, weekday: Weekday, n: u8) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_weekday_of_month_opt(t.year(), t.month(), weekday, n)?;
    Some(date.and_time(t.time()).and_utc())
}

/// Returns the `n`th occurrence (1-based, counted from the end) of `weekday`
/// in the month containing `t`.
///
/// `None` when `n` is zero or the month has fewer than `n` such weekdays.
#[must_use]
pub fn nth_last_weekday_of_month(
    t: DateTime<Utc>,
    weekday: Weekday,
    n: u8,
) -> Option<DateTime<Utc>> {
    if n == 0 {
        return None;
    }

    let first = NaiveDate::from_ymd_opt(t.year(), t.month(), 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;

    let back = (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    let date = last.checked_sub_signed(TimeDelta::days(
        i64::from(back) + 7 * (i64::from(n) - 1),
    ))?;

    if date.month() != t.month() {
        return None;
    }
    Some(date.and_time(t.time()).and_utc())
}

/// Returns whether `t` is the zero timestamp (the Unix epoch), used as the
/// "unset" marker for event times.
#[must_use]
pub fn is_zero(t: DateTime<Utc>) -> bool {
    t == DateTime::<Utc>::UNIX_EPOCH
}
