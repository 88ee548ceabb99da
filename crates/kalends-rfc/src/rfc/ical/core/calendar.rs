//! The VCALENDAR aggregate.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use kalends_core::constants::{DEFAULT_PRODID, ICALENDAR_VERSION};

use super::component::impl_component_like;
use super::datetime::format_duration;
use super::{Component, ComponentBase, ComponentKind, ComponentLike, Property, VEvent, VTimezone, names};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::{serialize, serialize_to};
use crate::rfc::ical::parse;

/// Producer families recognised from PRODID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProdVendor {
    Microsoft,
    Google,
    Apple,
    /// Anything else, including a missing PRODID.
    Caldav,
}

impl ProdVendor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Microsoft => "microsoft",
            Self::Google => "google",
            Self::Apple => "apple",
            Self::Caldav => "caldav",
        }
    }

    /// Classifies a PRODID value by case-insensitive substring match.
    #[must_use]
    pub fn classify(prodid: &str) -> Self {
        let lower = prodid.to_lowercase();
        if lower.contains("microsoft") {
            Self::Microsoft
        } else if lower.contains("google") {
            Self::Google
        } else if lower.contains("icloud") {
            Self::Apple
        } else {
            Self::Caldav
        }
    }
}

impl fmt::Display for ProdVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One iCalendar document: top-level properties plus components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    base: ComponentBase,
}

impl_component_like!(Calendar, ComponentKind::Calendar);

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    /// Creates a calendar with VERSION and the default PRODID.
    #[must_use]
    pub fn new() -> Self {
        Self::new_for(DEFAULT_PRODID)
    }

    /// Creates a calendar with VERSION and the given PRODID.
    #[must_use]
    pub fn new_for(prodid: impl Into<String>) -> Self {
        let mut calendar = Self::empty();
        calendar.set_version(ICALENDAR_VERSION);
        calendar.set_product_id(prodid);
        calendar
    }

    /// A calendar with no properties at all, used by the parser.
    pub(crate) fn empty() -> Self {
        Self {
            base: ComponentBase::default(),
        }
    }

    // Construction from input

    /// Parses a calendar from a buffered reader.
    ///
    /// ## Errors
    /// Fails on I/O errors and malformed input.
    pub fn from_reader<R: BufRead>(reader: R) -> RfcResult<Self> {
        parse::parse(reader)
    }

    /// Parses a calendar from raw bytes.
    ///
    /// ## Errors
    /// Fails on invalid UTF-8 and malformed input.
    pub fn from_bytes(bytes: &[u8]) -> RfcResult<Self> {
        parse::parse(bytes)
    }

    /// Parses a calendar from text.
    ///
    /// ## Errors
    /// Fails on malformed input.
    pub fn from_text(text: &str) -> RfcResult<Self> {
        parse::parse_str(text)
    }

    /// Reads and parses a calendar file.
    ///
    /// ## Errors
    /// Fails if the file cannot be opened or its content is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> RfcResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading calendar file");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    // Output

    /// Serializes the calendar to text with CRLF line endings.
    #[must_use]
    pub fn serialize(&self) -> String {
        serialize(self)
    }

    /// Writes the serialized calendar to `writer`.
    ///
    /// ## Errors
    /// Propagates write failures.
    pub fn serialize_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        serialize_to(self, writer)
    }

    // Top-level properties

    fn set_text(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.set_property(Property::new(name, value));
        self
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.set_text(names::VERSION, version)
    }

    pub fn set_product_id(&mut self, prodid: impl Into<String>) -> &mut Self {
        self.set_text(names::PRODID, prodid)
    }

    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.set_text(names::METHOD, method)
    }

    pub fn set_calscale(&mut self, calscale: impl Into<String>) -> &mut Self {
        self.set_text(names::CALSCALE, calscale)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_text(names::NAME, name)
    }

    pub fn set_x_wr_cal_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_text(names::X_WR_CALNAME, name)
    }

    pub fn set_x_wr_cal_desc(&mut self, description: impl Into<String>) -> &mut Self {
        self.set_text(names::X_WR_CALDESC, description)
    }

    pub fn set_x_wr_timezone(&mut self, tzid: impl Into<String>) -> &mut Self {
        self.set_text(names::X_WR_TIMEZONE, tzid)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.set_text(names::DESCRIPTION, description)
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.set_text(names::URL, url)
    }

    pub fn set_refresh_interval(&mut self, interval: TimeDelta) -> &mut Self {
        self.set_property(Property::with_params(
            names::REFRESH_INTERVAL,
            vec![super::Parameter::value_type("DURATION")],
            format_duration(interval),
        ));
        self
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.set_text(names::COLOR, color)
    }

    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.get_property_string(names::VERSION)
    }

    #[must_use]
    pub fn product_id(&self) -> Option<String> {
        self.get_property_string(names::PRODID)
    }

    #[must_use]
    pub fn method(&self) -> Option<String> {
        self.get_property_string(names::METHOD)
    }

    /// NAME, falling back to X-WR-CALNAME.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.get_property_string(names::NAME)
            .or_else(|| self.get_property_string(names::X_WR_CALNAME))
    }

    /// Classifies the producer from PRODID.
    #[must_use]
    pub fn prod_vendor(&self) -> ProdVendor {
        self.product_id()
            .map_or(ProdVendor::Caldav, |p| ProdVendor::classify(&p))
    }

    // Components

    /// Appends a new event with the given UID and returns it for configuration.
    pub fn add_event(&mut self, uid: impl Into<String>) -> Option<&mut VEvent> {
        self.add_vevent(VEvent::new(uid))
    }

    /// Appends an existing event and returns the stored copy.
    pub fn add_vevent(&mut self, event: VEvent) -> Option<&mut VEvent> {
        self.add_component(Component::Event(event));
        self.base.components.last_mut().and_then(Component::as_event_mut)
    }

    /// Appends a new timezone with the given TZID and returns it.
    pub fn add_timezone(&mut self, tzid: impl Into<String>) -> Option<&mut VTimezone> {
        self.add_component(Component::Timezone(VTimezone::new(tzid)));
        self.base.components.last_mut().and_then(Component::as_timezone_mut)
    }

    /// Events in document order.
    #[must_use]
    pub fn events(&self) -> Vec<&VEvent> {
        self.components()
            .iter()
            .filter_map(Component::as_event)
            .collect()
    }

    /// Mutable events in document order.
    pub fn events_mut(&mut self) -> Vec<&mut VEvent> {
        self.base
            .components
            .iter_mut()
            .filter_map(Component::as_event_mut)
            .collect()
    }

    /// First VTIMEZONE, if any.
    #[must_use]
    pub fn time_zone(&self) -> Option<&VTimezone> {
        self.components().iter().find_map(Component::as_timezone)
    }

    fn first_event(&self) -> RfcResult<&VEvent> {
        self.components()
            .iter()
            .find_map(Component::as_event)
            .ok_or(RfcError::NoEvents)
    }

    /// DTSTART of the first event.
    ///
    /// ## Errors
    /// `NoEvents` if there are no events, otherwise as [`VEvent::start_at`].
    pub fn event_start_at(&self) -> RfcResult<DateTime<Utc>> {
        self.first_event()?.start_at()
    }

    /// End of the first event.
    ///
    /// ## Errors
    /// `NoEvents` if there are no events, otherwise as [`VEvent::end_at`].
    pub fn event_end_at(&self) -> RfcResult<DateTime<Utc>> {
        self.first_event()?.end_at()
    }

    /// LOCATION of the first event; `None` if there are no events.
    #[must_use]
    pub fn event_location(&self) -> Option<String> {
        self.first_event().ok()?.location()
    }
}

impl FromStr for Calendar {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::rfc::ical::core::AlarmAction;

    #[test]
    fn new_seeds_version_and_prodid() {
        let cal = Calendar::new();
        assert_eq!(cal.version().as_deref(), Some("2.0"));
        assert_eq!(cal.product_id().as_deref(), Some(DEFAULT_PRODID));
        let names: Vec<_> = cal.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["VERSION", "PRODID"]);
    }

    #[test]
    fn set_property_updates_in_place() {
        let mut cal = Calendar::new();
        cal.set_method("PUBLISH");
        cal.set_product_id("-//Other//EN");
        let names: Vec<_> = cal.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["VERSION", "PRODID", "METHOD"]);
        assert_eq!(cal.product_id().as_deref(), Some("-//Other//EN"));
    }

    #[test]
    fn add_property_allows_duplicates() {
        let mut cal = Calendar::new();
        cal.add_property(Property::new("X-TAG", "a"));
        cal.add_property(Property::new("X-TAG", "b"));
        assert_eq!(cal.get_properties("x-tag").len(), 2);
        assert_eq!(cal.get_property_string("X-TAG").as_deref(), Some("a"));
    }

    #[test]
    fn vendor_classification() {
        let cases = [
            ("-//Microsoft Corporation//Outlook 16.0 MIMEDIR//EN", ProdVendor::Microsoft),
            ("-//Google Inc//Google Calendar 70.9054//EN", ProdVendor::Google),
            ("-//Apple Inc.//iCloud Calendar//EN", ProdVendor::Apple),
            ("-//Nextcloud//CalDAV//EN", ProdVendor::Caldav),
        ];
        for (prodid, expected) in cases {
            let mut cal = Calendar::new();
            cal.set_product_id(prodid);
            assert_eq!(cal.prod_vendor(), expected, "{prodid}");
        }

        let cal = Calendar::empty();
        assert_eq!(cal.prod_vendor(), ProdVendor::Caldav);
        assert_eq!(ProdVendor::Apple.to_string(), "apple");
    }

    #[test]
    fn events_and_timezone_preserve_order() {
        let mut cal = Calendar::new();
        cal.add_event("a");
        cal.add_timezone("Europe/Paris");
        cal.add_event("b");
        cal.add_timezone("America/New_York");

        let uids: Vec<_> = cal.events().iter().filter_map(|e| e.uid()).collect();
        assert_eq!(uids, vec!["a", "b"]);
        assert_eq!(cal.time_zone().and_then(VTimezone::value).as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn adders_return_the_appended_component() {
        let mut cal = Calendar::new();
        cal.add_event("a").unwrap().set_summary("First");
        cal.add_timezone("Europe/Paris").unwrap().add_daylight().unwrap();
        let event = cal.add_vevent(VEvent::new("b")).unwrap();
        assert_eq!(event.uid().as_deref(), Some("b"));
        event.add_alarm().unwrap().set_action(AlarmAction::Display);

        let events = cal.events();
        assert_eq!(events[0].summary().as_deref(), Some("First"));
        assert_eq!(events[1].alarms().len(), 1);
        assert_eq!(cal.time_zone().map(|tz| tz.daylight().len()), Some(1));
    }

    #[test]
    fn events_mut_edits_in_place() {
        let mut cal = Calendar::new();
        cal.add_event("a");
        cal.add_event("b");
        for event in cal.events_mut() {
            event.set_summary("Edited");
        }
        assert!(cal.events().iter().all(|e| e.summary().as_deref() == Some("Edited")));
    }

    #[test]
    fn first_event_delegations() {
        let mut cal = Calendar::new();
        assert!(matches!(cal.event_start_at(), Err(RfcError::NoEvents)));
        assert!(matches!(cal.event_end_at(), Err(RfcError::NoEvents)));
        assert_eq!(cal.event_location(), None);

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        cal.add_event("a")
            .unwrap()
            .set_start_at(start)
            .set_end_at(start + TimeDelta::hours(1))
            .set_location("Room 1");
        cal.add_event("b").unwrap().set_location("Room 2");

        assert_eq!(cal.event_start_at().unwrap(), start);
        assert_eq!(cal.event_end_at().unwrap(), start + TimeDelta::hours(1));
        assert_eq!(cal.event_location().as_deref(), Some("Room 1"));
    }

    #[test]
    fn name_falls_back_to_x_wr_calname() {
        let mut cal = Calendar::new();
        assert_eq!(cal.name(), None);
        cal.set_x_wr_cal_name("Team");
        assert_eq!(cal.name().as_deref(), Some("Team"));
        cal.set_name("Official");
        assert_eq!(cal.name().as_deref(), Some("Official"));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = std::env::temp_dir().join(format!("kalends-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("calendar.ics");
        std::fs::write(&path, Calendar::new().serialize()).unwrap();

        let cal = Calendar::from_path(&path).unwrap();
        assert_eq!(cal.version().as_deref(), Some("2.0"));

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(Calendar::from_path(&path), Err(RfcError::Io(_))));
    }

    #[test]
    fn text_that_looks_like_a_path_is_parsed_as_text() {
        let err = Calendar::from_text("/etc/hosts").unwrap_err();
        assert!(err.is_malformed());
    }
}
