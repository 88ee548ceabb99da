//! Value data types (RFC 5545 §3.3).
//!
//! The engine only needs to know whether a value is TEXT, which decides
//! escaping. The other types are recognised so callers can tell them apart.

use super::{Parameter, parameter};

/// Declared or default data type of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    DateTime,
    Date,
    Duration,
    Period,
    Recur,
    Uri,
    CalAddress,
    Integer,
    Float,
    Boolean,
    Binary,
    UtcOffset,
    /// Anything else, kept verbatim.
    Unknown,
}

impl ValueType {
    /// Parses a `VALUE` parameter value.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Self::Text,
            "DATE-TIME" => Self::DateTime,
            "DATE" => Self::Date,
            "DURATION" => Self::Duration,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "URI" => Self::Uri,
            "CAL-ADDRESS" => Self::CalAddress,
            "INTEGER" => Self::Integer,
            "FLOAT" => Self::Float,
            "BOOLEAN" => Self::Boolean,
            "BINARY" => Self::Binary,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Unknown,
        }
    }

    /// Resolves the value type of a property.
    ///
    /// An explicit `VALUE` parameter wins; otherwise the property name picks
    /// the default type.
    #[must_use]
    pub fn for_property(name: &str, params: &[Parameter]) -> Self {
        if let Some(explicit) = params
            .iter()
            .find(|p| p.is(parameter::names::VALUE))
            .and_then(Parameter::value)
        {
            return Self::from_param(explicit);
        }
        Self::default_for(name)
    }

    /// Returns the default type for a property name.
    #[must_use]
    pub fn default_for(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "CALSCALE" | "METHOD" | "PRODID" | "VERSION" | "CLASS" | "COMMENT" | "DESCRIPTION"
            | "LOCATION" | "SUMMARY" | "STATUS" | "TRANSP" | "TZID" | "TZNAME" | "UID"
            | "CONTACT" | "RELATED-TO" | "ACTION" | "NAME" | "COLOR" | "X-WR-CALNAME"
            | "X-WR-CALDESC" | "X-WR-TIMEZONE" => Self::Text,

            "DTSTART" | "DTEND" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "COMPLETED" | "DUE"
            | "RECURRENCE-ID" | "EXDATE" | "RDATE" => Self::DateTime,

            "DURATION" | "TRIGGER" | "REFRESH-INTERVAL" => Self::Duration,
            "FREEBUSY" => Self::Period,
            "RRULE" | "EXRULE" => Self::Recur,
            "URL" | "TZURL" | "SOURCE" | "ATTACH" => Self::Uri,
            "ATTENDEE" | "ORGANIZER" => Self::CalAddress,
            "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => Self::Integer,
            "GEO" => Self::Float,
            "TZOFFSETFROM" | "TZOFFSETTO" => Self::UtcOffset,
            _ => Self::Unknown,
        }
    }

    /// Returns whether values of this type use TEXT escaping.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_defaults() {
        assert!(ValueType::default_for("SUMMARY").is_text());
        assert!(ValueType::default_for("description").is_text());
        assert!(ValueType::default_for("X-WR-CALNAME").is_text());
    }

    #[test]
    fn non_text_defaults() {
        assert_eq!(ValueType::default_for("DTSTART"), ValueType::DateTime);
        assert_eq!(ValueType::default_for("RRULE"), ValueType::Recur);
        assert_eq!(ValueType::default_for("CATEGORIES"), ValueType::Unknown);
        assert_eq!(ValueType::default_for("X-CUSTOM"), ValueType::Unknown);
    }

    #[test]
    fn explicit_value_param_wins() {
        let params = vec![Parameter::value_type("text")];
        assert!(ValueType::for_property("X-CUSTOM", &params).is_text());

        let params = vec![Parameter::value_type("DATE")];
        assert_eq!(ValueType::for_property("DTSTART", &params), ValueType::Date);
    }
}
