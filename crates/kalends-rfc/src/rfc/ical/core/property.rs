//! iCalendar property and content line types (RFC 5545 §3.1, §3.8).

use std::borrow::Cow;

use super::{Parameter, ValueType};
use crate::rfc::ical::build::escape_text;
use crate::rfc::ical::parse::unescape_text;

/// A raw content line as parsed from iCalendar text.
///
/// This is the low-level representation before value type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name, as written.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

/// An iCalendar property.
///
/// `value` holds the decoded value: TEXT values are unescaped on read and
/// escaped again on write, every other type is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name, as written. Lookups compare case-insensitively.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Decoded value.
    pub value: String,
}

impl Property {
    /// Creates a property without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// Creates a property with parameters.
    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        params: Vec<Parameter>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            value: value.into(),
        }
    }

    /// Creates a property from a content line, unescaping TEXT values.
    #[must_use]
    pub fn from_content_line(cl: ContentLine) -> Self {
        let value = if ValueType::for_property(&cl.name, &cl.params).is_text() {
            unescape_text(&cl.raw_value)
        } else {
            cl.raw_value
        };
        Self {
            name: cl.name,
            params: cl.params,
            value,
        }
    }

    /// Returns whether this property is called `name` (case-insensitive).
    #[must_use]
    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the resolved value type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        ValueType::for_property(&self.name, &self.params)
    }

    /// Returns whether the value is TEXT.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.value_type().is_text()
    }

    /// Returns the value as it appears on the wire.
    #[must_use]
    pub fn raw_value(&self) -> Cow<'_, str> {
        if self.is_text() {
            Cow::Owned(escape_text(&self.value))
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.is(name))
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Adds a parameter to this property.
    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Sets a parameter, replacing the first one with the same name in place.
    pub fn set_param(&mut self, param: Parameter) {
        match self.params.iter_mut().find(|p| p.is(&param.name)) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
    }
}

/// Property names the engine reads or writes.
pub mod names {
    // Calendar properties
    pub const CALSCALE: &str = "CALSCALE";
    pub const METHOD: &str = "METHOD";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    // Descriptive properties
    pub const ATTACH: &str = "ATTACH";
    pub const CLASS: &str = "CLASS";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const GEO: &str = "GEO";
    pub const LOCATION: &str = "LOCATION";
    pub const PRIORITY: &str = "PRIORITY";
    pub const STATUS: &str = "STATUS";
    pub const SUMMARY: &str = "SUMMARY";

    // Date and time properties
    pub const DTEND: &str = "DTEND";
    pub const DTSTART: &str = "DTSTART";
    pub const DURATION: &str = "DURATION";
    pub const TRANSP: &str = "TRANSP";

    // Timezone properties
    pub const TZID: &str = "TZID";

    // Relationship properties
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const URL: &str = "URL";
    pub const UID: &str = "UID";

    // Recurrence properties
    pub const EXDATE: &str = "EXDATE";
    pub const RDATE: &str = "RDATE";
    pub const RRULE: &str = "RRULE";

    // Alarm properties
    pub const ACTION: &str = "ACTION";
    pub const TRIGGER: &str = "TRIGGER";

    // Change management properties
    pub const CREATED: &str = "CREATED";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const SEQUENCE: &str = "SEQUENCE";

    // RFC 7986 extensions
    pub const COLOR: &str = "COLOR";
    pub const NAME: &str = "NAME";
    pub const REFRESH_INTERVAL: &str = "REFRESH-INTERVAL";

    // Common vendor extensions
    pub const X_WR_CALNAME: &str = "X-WR-CALNAME";
    pub const X_WR_CALDESC: &str = "X-WR-CALDESC";
    pub const X_WR_TIMEZONE: &str = "X-WR-TIMEZONE";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cl(name: &str, params: Vec<Parameter>, raw: &str) -> ContentLine {
        ContentLine {
            name: name.to_string(),
            params,
            raw_value: raw.to_string(),
        }
    }

    #[test]
    fn text_values_are_unescaped() {
        let prop = Property::from_content_line(cl("SUMMARY", Vec::new(), r"Lunch\, then\nreview"));
        assert_eq!(prop.value, "Lunch, then\nreview");
        assert_eq!(prop.raw_value(), r"Lunch\, then\nreview");
    }

    #[test]
    fn other_values_are_verbatim() {
        let prop = Property::from_content_line(cl("CATEGORIES", Vec::new(), r"A\,B,C"));
        assert_eq!(prop.value, r"A\,B,C");
        assert_eq!(prop.raw_value(), r"A\,B,C");
    }

    #[test]
    fn value_text_param_forces_escaping() {
        let params = vec![Parameter::value_type("TEXT")];
        let prop = Property::from_content_line(cl("X-NOTE", params, r"a\;b"));
        assert_eq!(prop.value, "a;b");
    }

    #[test]
    fn set_param_replaces_in_place() {
        let mut prop = Property::with_params(
            "ATTENDEE",
            vec![Parameter::cn("Jane"), Parameter::partstat("NEEDS-ACTION")],
            "mailto:jane@example.com",
        );
        prop.set_param(Parameter::new("cn", "Jane Doe"));
        prop.set_param(Parameter::rsvp(true));
        let names: Vec<_> = prop.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cn", "PARTSTAT", "RSVP"]);
        assert_eq!(prop.get_param_value("CN"), Some("Jane Doe"));
    }

    #[test]
    fn name_matching() {
        let prop = Property::new("x-Custom", "1");
        assert!(prop.name_is("X-CUSTOM"));
        assert!(!prop.name_is("X-OTHER"));
    }
}
