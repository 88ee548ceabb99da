//! Recurrence expansion over parsed documents.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use super::fixtures::*;
use crate::rfc::ical::core::{Calendar, Frequency, RRule};
use crate::rfc::ical::expand::SlotExpander;
use crate::rfc::ical::parse::parse_str;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn calendar_with_rule(rule: &str) -> Calendar {
    let input = VEVENT_WEEKLY.replace("FREQ=WEEKLY;BYDAY=MO,WE", rule);
    parse_str(&input).unwrap()
}

#[test_log::test]
fn weekly_byday_follows_declared_order() {
    let calendar = parse_str(VEVENT_WEEKLY).unwrap();
    let events = calendar.events();
    let slots = events[0].get_slots(Some(at(2024, 1, 15, 0)));

    let pairs: Vec<_> = slots.iter().map(|s| (s.start_at, s.end_at)).collect();
    assert_eq!(
        pairs,
        vec![
            (at(2024, 1, 1, 9), at(2024, 1, 1, 10)),
            (at(2024, 1, 3, 9), at(2024, 1, 3, 10)),
            (at(2024, 1, 8, 9), at(2024, 1, 8, 10)),
            (at(2024, 1, 10, 9), at(2024, 1, 10, 10)),
        ]
    );
    assert!(slots.iter().all(|s| s.event_id == "standup@example.com"));
}

#[test]
fn weekly_byday_is_not_merged_chronologically() {
    let calendar = calendar_with_rule("FREQ=WEEKLY;BYDAY=WE,MO");
    let events = calendar.events();
    let starts: Vec<_> = events[0]
        .get_slots(Some(at(2024, 1, 15, 0)))
        .iter()
        .map(|s| s.start_at)
        .collect();
    assert_eq!(starts, vec![at(2024, 1, 3, 9), at(2024, 1, 8, 9), at(2024, 1, 10, 9)]);
}

#[test]
fn monthly_last_friday_uses_rule_until() {
    let calendar = parse_str(VEVENT_MONTHLY_LAST_FRIDAY).unwrap();
    let events = calendar.events();
    let event = events[0];
    assert_eq!(event.end_at().unwrap(), at(2024, 1, 1, 16));

    let slots = event.get_slots(None);
    let starts: Vec<_> = slots.iter().map(|s| s.start_at).collect();
    assert_eq!(
        starts,
        vec![
            at(2024, 1, 26, 15),
            at(2024, 2, 23, 15),
            at(2024, 3, 29, 15),
            at(2024, 4, 26, 15),
            at(2024, 5, 31, 15),
        ]
    );
    assert!(slots.iter().all(|s| s.duration == TimeDelta::hours(1)));
}

#[test]
fn monthly_stops_exactly_at_bound() {
    let calendar = parse_str(VEVENT_MONTHLY_LAST_FRIDAY).unwrap();
    let events = calendar.events();
    let starts: Vec<_> = events[0]
        .get_slots(Some(at(2024, 3, 29, 15)))
        .iter()
        .map(|s| s.start_at)
        .collect();
    assert_eq!(starts, vec![at(2024, 1, 26, 15), at(2024, 2, 23, 15)]);
}

#[test]
fn unsupported_shapes_return_empty() {
    for rule in [
        "FREQ=YEARLY",
        "FREQ=WEEKLY",
        "FREQ=WEEKLY;BYDAY=1MO",
        "FREQ=MONTHLY",
        "FREQ=MONTHLY;BYDAY=MO,FR",
        "FREQ=HOURLY",
    ] {
        let calendar = calendar_with_rule(rule);
        let events = calendar.events();
        assert!(events[0].rrule().is_some(), "{rule}");
        assert!(events[0].get_slots(Some(at(2025, 1, 1, 0))).is_empty(), "{rule}");
    }
}

#[test]
fn configured_horizon_bounds_open_rules() {
    let calendar = calendar_with_rule("FREQ=DAILY");
    let events = calendar.events();
    let event = events[0];
    let rule = event.rrule().unwrap();
    let (start, end) = (event.start_at().unwrap(), event.end_at().unwrap());

    let expander = SlotExpander::with_horizon(TimeDelta::days(5));
    let slots = expander.expand_at(&rule, start, end, None, start);
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[4].start_at, at(2024, 1, 5, 9));
}

#[test]
fn rule_text_round_trips_through_event() {
    let calendar = calendar_with_rule("FREQ=MONTHLY;UNTIL=20240601T000000Z;BYDAY=-1FR,MO;INTERVAL=2");
    let events = calendar.events();
    let rule = events[0].rrule().unwrap();

    assert_eq!(rule.frequency, Frequency::Monthly);
    assert_eq!(rule.interval, 2);
    assert_eq!(
        rule.to_string(),
        "FREQ=MONTHLY;UNTIL=20240601T000000Z;BYDAY=-1FR,MO;INTERVAL=2"
    );
    assert_eq!(rule.to_string().parse::<RRule>().unwrap().interval, 2);
}

#[test]
fn slots_render_as_json() {
    let calendar = calendar_with_rule("FREQ=DAILY;COUNT=1");
    let events = calendar.events();
    let slots = events[0].get_slots(None);
    let json = serde_json::to_value(&slots).unwrap();

    assert_eq!(json[0]["event_id"], "standup@example.com");
    assert_eq!(json[0]["duration_seconds"], 3600);
    assert_eq!(json[0]["start_at"], "2024-01-01T09:00:00Z");
}
