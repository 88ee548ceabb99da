//! ATTENDEE views (RFC 5545 §3.8.4.1).

use std::fmt;

use serde::Serialize;

use super::{Property, parameter};

/// PARTSTAT values (RFC 5545 §3.2.12).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ParticipationStatus {
    #[default]
    NeedsAction,
    Accepted,
    Declined,
    Tentative,
    Delegated,
    Completed,
    InProcess,
    /// Any IANA or X- value, as written.
    Other(String),
}

impl ParticipationStatus {
    /// Parses a PARTSTAT value (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "NEEDS-ACTION" => Self::NeedsAction,
            "ACCEPTED" => Self::Accepted,
            "DECLINED" => Self::Declined,
            "TENTATIVE" => Self::Tentative,
            "DELEGATED" => Self::Delegated,
            "COMPLETED" => Self::Completed,
            "IN-PROCESS" => Self::InProcess,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NeedsAction => "NEEDS-ACTION",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Tentative => "TENTATIVE",
            Self::Delegated => "DELEGATED",
            Self::Completed => "COMPLETED",
            Self::InProcess => "IN-PROCESS",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strips a leading `mailto:` (any case) from a calendar address.
#[must_use]
pub fn strip_mailto(address: &str) -> &str {
    match address.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("mailto:") => &address[7..],
        _ => address,
    }
}

/// Read-only view over an ATTENDEE property.
#[derive(Debug, Clone, Copy)]
pub struct Attendee<'a> {
    property: &'a Property,
}

impl<'a> Attendee<'a> {
    /// Wraps a property. Returns `None` if it is not an ATTENDEE.
    #[must_use]
    pub fn from_property(property: &'a Property) -> Option<Self> {
        property
            .name_is(super::names::ATTENDEE)
            .then_some(Self { property })
    }

    /// Calendar address without the `mailto:` scheme.
    #[must_use]
    pub fn email(&self) -> &'a str {
        strip_mailto(&self.property.value)
    }

    /// CN parameter, if present.
    #[must_use]
    pub fn common_name(&self) -> Option<&'a str> {
        self.property.get_param_value(parameter::names::CN)
    }

    /// PARTSTAT parameter; `NEEDS-ACTION` when absent.
    #[must_use]
    pub fn participation_status(&self) -> ParticipationStatus {
        self.property
            .get_param_value(parameter::names::PARTSTAT)
            .map(ParticipationStatus::parse)
            .unwrap_or_default()
    }

    /// ROLE parameter, if present.
    #[must_use]
    pub fn role(&self) -> Option<&'a str> {
        self.property.get_param_value(parameter::names::ROLE)
    }

    /// Whether the organizer expects a reply.
    #[must_use]
    pub fn rsvp(&self) -> bool {
        self.property
            .get_param_value(parameter::names::RSVP)
            .is_some_and(|v| v.eq_ignore_ascii_case("TRUE"))
    }

    /// The underlying property.
    #[must_use]
    pub const fn property(&self) -> &'a Property {
        self.property
    }
}
