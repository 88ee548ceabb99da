//! VEVENT (RFC 5545 §3.6.1).

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use kalends_core::util::links;

use super::attendee::strip_mailto;
use super::component::impl_component_like;
use super::datetime::{format_date, format_duration, format_utc};
use super::{
    Attendee, Component, ComponentBase, ComponentKind, ComponentLike, Parameter, Property, RRule,
    RRuleSlot, VAlarm, names,
};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::expand::SlotExpander;
use crate::rfc::ical::parse::parse_duration;

/// STATUS values for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Tentative,
    Confirmed,
    Cancelled,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tentative => "TENTATIVE",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// TRANSP values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    Opaque,
    Transparent,
}

impl Transparency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Transparent => "TRANSPARENT",
        }
    }
}

/// CLASS values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Public,
    Private,
    Confidential,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Confidential => "CONFIDENTIAL",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        })*
    };
}

impl_display_as_str!(EventStatus, Transparency, Classification);

/// A calendar event.
///
/// Setters replace the first property with the same name; `add_*` methods
/// append.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VEvent {
    base: ComponentBase,
}

impl_component_like!(VEvent, ComponentKind::Event);

impl VEvent {
    /// Creates an event with its UID set.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        let mut event = Self::default();
        event.set_uid(uid);
        event
    }

    fn set_text(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.set_property(Property::new(name, value));
        self
    }

    fn set_time(&mut self, name: &str, t: DateTime<Utc>) -> &mut Self {
        self.set_text(name, format_utc(t))
    }

    fn set_date(&mut self, name: &str, t: DateTime<Utc>) -> &mut Self {
        self.set_property(Property::with_params(
            name,
            vec![Parameter::value_type("DATE")],
            format_date(t),
        ));
        self
    }

    // Identity and change management

    pub fn set_uid(&mut self, uid: impl Into<String>) -> &mut Self {
        self.set_text(names::UID, uid)
    }

    pub fn set_dtstamp(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_time(names::DTSTAMP, t)
    }

    pub fn set_created(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_time(names::CREATED, t)
    }

    pub fn set_last_modified(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_time(names::LAST_MODIFIED, t)
    }

    pub fn set_sequence(&mut self, sequence: u32) -> &mut Self {
        self.set_text(names::SEQUENCE, sequence.to_string())
    }

    // Descriptive properties

    pub fn set_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.set_text(names::SUMMARY, summary)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.set_text(names::DESCRIPTION, description)
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.set_text(names::LOCATION, location)
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.set_text(names::URL, url)
    }

    pub fn set_status(&mut self, status: EventStatus) -> &mut Self {
        self.set_text(names::STATUS, status.as_str())
    }

    pub fn set_class(&mut self, class: Classification) -> &mut Self {
        self.set_text(names::CLASS, class.as_str())
    }

    pub fn set_priority(&mut self, priority: u8) -> &mut Self {
        self.set_text(names::PRIORITY, priority.to_string())
    }

    pub fn set_transparency(&mut self, transparency: Transparency) -> &mut Self {
        self.set_text(names::TRANSP, transparency.as_str())
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.set_text(names::COLOR, color)
    }

    pub fn set_geo(&mut self, latitude: f64, longitude: f64) -> &mut Self {
        self.set_text(names::GEO, format!("{latitude};{longitude}"))
    }

    /// Sets the ORGANIZER, adding the `mailto:` scheme and an optional CN.
    pub fn set_organizer(&mut self, email: &str, common_name: Option<&str>) -> &mut Self {
        let params = common_name.map(Parameter::cn).into_iter().collect();
        self.set_property(Property::with_params(
            names::ORGANIZER,
            params,
            format!("mailto:{}", strip_mailto(email)),
        ));
        self
    }

    // Date and time

    /// Sets DTSTART as a UTC date-time.
    pub fn set_start_at(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_time(names::DTSTART, t)
    }

    /// Sets DTEND as a UTC date-time.
    pub fn set_end_at(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_time(names::DTEND, t)
    }

    /// Sets DTSTART as a date (`VALUE=DATE`).
    pub fn set_all_day_start_at(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_date(names::DTSTART, t)
    }

    /// Sets DTEND as a date (`VALUE=DATE`).
    pub fn set_all_day_end_at(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.set_date(names::DTEND, t)
    }

    pub fn set_duration(&mut self, duration: TimeDelta) -> &mut Self {
        self.set_text(names::DURATION, format_duration(duration))
    }

    // Relationships and attachments

    /// Appends an ATTENDEE with the `mailto:` scheme.
    pub fn add_attendee(&mut self, email: &str, params: Vec<Parameter>) -> &mut Self {
        self.add_property(Property::with_params(
            names::ATTENDEE,
            params,
            format!("mailto:{}", strip_mailto(email)),
        ));
        self
    }

    /// Appends an ATTACH referencing a URI.
    pub fn add_attachment_url(&mut self, url: impl Into<String>, media_type: Option<&str>) -> &mut Self {
        let params = media_type.map(Parameter::fmttype).into_iter().collect();
        self.add_property(Property::with_params(names::ATTACH, params, url));
        self
    }

    /// Appends an inline ATTACH holding `bytes` as base64.
    pub fn add_attachment_binary(&mut self, bytes: &[u8], content_type: &str) -> &mut Self {
        self.add_property(Property::with_params(
            names::ATTACH,
            vec![
                Parameter::fmttype(content_type),
                Parameter::encoding("base64"),
                Parameter::value_type("binary"),
            ],
            BASE64.encode(bytes),
        ));
        self
    }

    // Recurrence

    pub fn set_rrule(&mut self, rule: &RRule) -> &mut Self {
        self.set_text(names::RRULE, rule.to_string())
    }

    pub fn add_exdate(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.add_property(Property::new(names::EXDATE, format_utc(t)));
        self
    }

    pub fn add_rdate(&mut self, t: DateTime<Utc>) -> &mut Self {
        self.add_property(Property::new(names::RDATE, format_utc(t)));
        self
    }

    /// Appends a VALARM and returns it for configuration.
    pub fn add_alarm(&mut self) -> Option<&mut VAlarm> {
        self.add_component(Component::Alarm(VAlarm::new()));
        self.base_mut().components.last_mut().and_then(Component::as_alarm_mut)
    }

    // Getters

    #[must_use]
    pub fn uid(&self) -> Option<String> {
        self.get_property_string(names::UID)
    }

    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.get_property_string(names::SUMMARY)
    }

    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.get_property_string(names::DESCRIPTION)
    }

    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.get_property_string(names::LOCATION)
    }

    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.get_property_string(names::URL)
    }

    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.get_property_string(names::STATUS)
    }

    /// ORGANIZER address without the `mailto:` scheme.
    #[must_use]
    pub fn organizer(&self) -> Option<String> {
        self.get_property(names::ORGANIZER)
            .map(|p| strip_mailto(&p.value).to_string())
    }

    /// ## Errors
    /// Fails if DTSTAMP is missing or not a timestamp.
    pub fn dtstamp(&self) -> RfcResult<DateTime<Utc>> {
        self.get_property_time(names::DTSTAMP)
    }

    /// Reads DTSTART.
    ///
    /// ## Errors
    /// Fails if DTSTART is missing or not a timestamp.
    pub fn start_at(&self) -> RfcResult<DateTime<Utc>> {
        self.get_property_time(names::DTSTART)
    }

    /// Reads DTEND, falling back to DTSTART plus DURATION.
    ///
    /// ## Errors
    /// Fails if neither form resolves.
    pub fn end_at(&self) -> RfcResult<DateTime<Utc>> {
        if self.get_property(names::DTEND).is_some() {
            return self.get_property_time(names::DTEND);
        }

        let Some(duration) = self.get_property(names::DURATION) else {
            return Err(RfcError::PropertyNotFound(names::DTEND.to_string()));
        };
        let delta = parse_duration(&duration.value, 0)?;
        let start = self.start_at()?;
        start
            .checked_add_signed(delta)
            .ok_or_else(|| RfcError::InvalidDateTime {
                property: names::DURATION.to_string(),
                value: duration.value.clone(),
            })
    }

    /// Reads DTSTART as a calendar date.
    ///
    /// ## Errors
    /// Fails if DTSTART is missing or not a timestamp.
    pub fn all_day_start_at(&self) -> RfcResult<NaiveDate> {
        Ok(self.start_at()?.date_naive())
    }

    /// `end_at - start_at`, or zero if either does not resolve.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        match (self.start_at(), self.end_at()) {
            (Ok(start), Ok(end)) => end - start,
            _ => TimeDelta::zero(),
        }
    }

    #[must_use]
    pub fn attendees(&self) -> Vec<Attendee<'_>> {
        self.properties()
            .iter()
            .filter_map(Attendee::from_property)
            .collect()
    }

    #[must_use]
    pub fn attendees_emails(&self) -> Vec<String> {
        self.attendees()
            .iter()
            .map(|a| a.email().to_string())
            .collect()
    }

    #[must_use]
    pub fn alarms(&self) -> Vec<&VAlarm> {
        self.components()
            .iter()
            .filter_map(Component::as_alarm)
            .collect()
    }

    #[must_use]
    pub fn is_status_cancelled(&self) -> bool {
        self.status()
            .is_some_and(|s| s.eq_ignore_ascii_case(EventStatus::Cancelled.as_str()))
    }

    /// First conferencing link found in DESCRIPTION.
    #[must_use]
    pub fn link_meeting(&self) -> Option<String> {
        links::find_conference_url(&self.description()?)
    }

    /// Parses RRULE, tagging the rule with this event's UID.
    ///
    /// A malformed rule is logged and treated as absent.
    #[must_use]
    pub fn rrule(&self) -> Option<RRule> {
        let property = self.get_property(names::RRULE)?;
        match property.value.parse::<RRule>() {
            Ok(rule) => Some(rule.with_event_id(self.uid().unwrap_or_default())),
            Err(e) => {
                tracing::warn!(uid = ?self.uid(), error = %e, "Ignoring unparseable RRULE");
                None
            }
        }
    }

    /// Expands this event's RRULE with the default horizon.
    ///
    /// Empty if the event has no rule or its start/end do not resolve.
    #[must_use]
    pub fn get_slots(&self, until: Option<DateTime<Utc>>) -> Vec<RRuleSlot> {
        self.get_slots_with(&SlotExpander::default(), until)
    }

    /// Expands this event's RRULE with an explicitly configured expander.
    #[must_use]
    pub fn get_slots_with(&self, expander: &SlotExpander, until: Option<DateTime<Utc>>) -> Vec<RRuleSlot> {
        let Some(rule) = self.rrule() else {
            return Vec::new();
        };
        let (Ok(start), Ok(end)) = (self.start_at(), self.end_at()) else {
            tracing::debug!(uid = %rule.event_id, "Event times unresolved, no slots");
            return Vec::new();
        };
        expander.expand(&rule, start, end, until)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
