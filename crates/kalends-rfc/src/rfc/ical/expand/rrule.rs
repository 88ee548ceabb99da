//! Slot expansion for the recurrence shapes the engine supports.
//!
//! Only three shapes produce slots: DAILY, WEEKLY with a plain BYDAY list and
//! MONTHLY with an ordinal BYDAY. Every other rule expands to nothing rather
//! than failing.

use chrono::{DateTime, TimeDelta, Utc, Weekday};
use kalends_core::constants::DEFAULT_HORIZON_DAYS;
use kalends_core::util::datemath;

use crate::rfc::ical::core::{ByDay, Frequency, RRule, RRuleSlot};

/// Expands recurrence rules into slots.
///
/// The horizon bounds expansion when neither an explicit `until` nor the
/// rule's own UNTIL is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotExpander {
    horizon: TimeDelta,
}

impl Default for SlotExpander {
    fn default() -> Self {
        Self::with_horizon(TimeDelta::days(DEFAULT_HORIZON_DAYS))
    }
}

/// Collects slots for one rule, honouring COUNT.
struct Slots<'a> {
    event_id: &'a str,
    limit: Option<usize>,
    out: Vec<RRuleSlot>,
}

impl<'a> Slots<'a> {
    fn new(rule: &'a RRule) -> Self {
        Self {
            event_id: &rule.event_id,
            limit: rule.count.and_then(|c| usize::try_from(c).ok()),
            out: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.out.len() >= limit)
    }

    /// Pushes a slot; returns false once the COUNT limit is reached.
    fn push(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if self.is_full() {
            return false;
        }
        tracing::trace!(%start, %end, "Slot");
        self.out.push(RRuleSlot::new(self.event_id, start, end));
        !self.is_full()
    }
}

fn reached(start: DateTime<Utc>, end: DateTime<Utc>, bound: DateTime<Utc>) -> bool {
    start >= bound || end >= bound
}

impl SlotExpander {
    /// Creates an expander with the given fallback horizon.
    #[must_use]
    pub const fn with_horizon(horizon: TimeDelta) -> Self {
        Self { horizon }
    }

    #[must_use]
    pub const fn horizon(&self) -> TimeDelta {
        self.horizon
    }

    /// ## Summary
    /// Expands `rule` for an event spanning `start..end`, relative to now.
    ///
    /// See [`SlotExpander::expand_at`].
    #[must_use]
    pub fn expand(
        &self,
        rule: &RRule,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
    ) -> Vec<RRuleSlot> {
        self.expand_at(rule, start, end, until, Utc::now())
    }

    /// ## Summary
    /// Expands `rule` for an event spanning `start..end`.
    ///
    /// The bound is `until` if given, else the rule's UNTIL, else
    /// `now + horizon`. Unsupported rule shapes yield an empty list.
    #[must_use]
    pub fn expand_at(
        &self,
        rule: &RRule,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Vec<RRuleSlot> {
        if datemath::is_zero(start) {
            tracing::debug!(event_id = %rule.event_id, "Event has no start, no slots");
            return Vec::new();
        }

        let bound = until.or(rule.until).unwrap_or_else(|| {
            now.checked_add_signed(self.horizon)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        });
        let interval = rule.interval.max(1);

        tracing::debug!(
            event_id = %rule.event_id,
            frequency = %rule.frequency,
            %bound,
            "Expanding recurrence"
        );

        let mut slots = Slots::new(rule);
        match (rule.frequency, &rule.by_day) {
            (Frequency::Daily, _) => daily(&mut slots, start, end, bound, interval),
            (Frequency::Weekly, Some(ByDay::PlainDays(days))) => {
                weekly(&mut slots, days, start, end, bound, interval);
            }
            (Frequency::Monthly, Some(ByDay::OrdinalDay { ordinal, weekday, .. })) => {
                monthly(&mut slots, *ordinal, *weekday, start, end, bound, interval);
            }
            _ => {
                tracing::debug!(rule = %rule, "Unsupported recurrence shape");
            }
        }
        slots.out
    }
}

fn daily(
    slots: &mut Slots<'_>,
    mut start: DateTime<Utc>,
    mut end: DateTime<Utc>,
    bound: DateTime<Utc>,
    interval: u32,
) {
    if !slots.push(start, end) {
        return;
    }
    let step = i64::from(interval);
    loop {
        let (Some(s), Some(e)) = (datemath::add_days(start, step), datemath::add_days(end, step))
        else {
            return;
        };
        if reached(s, e, bound) || !slots.push(s, e) {
            return;
        }
        (start, end) = (s, e);
    }
}

/// Walks BYDAY in declared order, moving forward to each weekday in turn
/// and one day past it before looking for the next.
fn weekly(
    slots: &mut Slots<'_>,
    days: &[Weekday],
    mut start: DateTime<Utc>,
    mut end: DateTime<Utc>,
    bound: DateTime<Utc>,
    interval: u32,
) {
    if days.is_empty() {
        return;
    }
    let skip = i64::from(interval) - 1;

    loop {
        for &day in days {
            let Some(s) = datemath::next_weekday(start, day, true) else {
                return;
            };
            let Some(e) = end.checked_add_signed(s - start) else {
                return;
            };
            if reached(s, e, bound) || !slots.push(s, e) {
                return;
            }
            let (Some(next_s), Some(next_e)) = (datemath::add_days(s, 1), datemath::add_days(e, 1))
            else {
                return;
            };
            (start, end) = (next_s, next_e);
        }

        if skip > 0 {
            let (Some(s), Some(e)) = (datemath::add_weeks(start, skip), datemath::add_weeks(end, skip))
            else {
                return;
            };
            (start, end) = (s, e);
        }
    }
}

fn monthly(
    slots: &mut Slots<'_>,
    ordinal: i8,
    weekday: Weekday,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    bound: DateTime<Utc>,
    interval: u32,
) {
    let n = ordinal.unsigned_abs();
    let step = i32::try_from(interval).unwrap_or(i32::MAX);
    let mut anchor = start;
    let mut months = 0_i32;

    while anchor < bound {
        let occurrence = if ordinal < 0 {
            datemath::nth_last_weekday_of_month(anchor, weekday, n)
        } else {
            datemath::nth_weekday_of_month(anchor, weekday, n)
        };

        // Months without the requested weekday are skipped
        if let Some(s) = occurrence {
            let Some(e) = end.checked_add_signed(s - start) else {
                return;
            };
            if reached(s, e, bound) || !slots.push(s, e) {
                return;
            }
        }

        months = months.saturating_add(step);
        let Some(next) = datemath::add_months(start, months) else {
            return;
        };
        anchor = next;
    }
}
