//! VALARM (RFC 5545 §3.6.6).
//!
//! Alarms are stored and serialized; triggers are never evaluated.

use std::fmt;

use chrono::TimeDelta;

use super::component::impl_component_like;
use super::datetime::format_duration;
use super::{ComponentBase, ComponentKind, ComponentLike, Property, names};

/// ACTION values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmAction {
    Audio,
    Display,
    Email,
}

impl AlarmAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "AUDIO",
            Self::Display => "DISPLAY",
            Self::Email => "EMAIL",
        }
    }

    /// Parses an ACTION value (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "AUDIO" => Self::Audio,
            "DISPLAY" => Self::Display,
            "EMAIL" => Self::Email,
            _ => return None,
        })
    }
}

impl fmt::Display for AlarmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VAlarm {
    base: ComponentBase,
}

impl_component_like!(VAlarm, ComponentKind::Alarm);

impl VAlarm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_action(&mut self, action: AlarmAction) -> &mut Self {
        self.set_property(Property::new(names::ACTION, action.as_str()));
        self
    }

    /// Sets a TRIGGER relative to the start of the parent component.
    pub fn set_trigger(&mut self, offset: TimeDelta) -> &mut Self {
        self.set_property(Property::new(names::TRIGGER, format_duration(offset)));
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.set_property(Property::new(names::DESCRIPTION, description));
        self
    }

    /// Returns the ACTION, if it is one of the known values.
    #[must_use]
    pub fn action(&self) -> Option<AlarmAction> {
        self.get_property(names::ACTION)
            .and_then(|p| AlarmAction::parse(&p.value))
    }

    /// Returns the raw TRIGGER value.
    #[must_use]
    pub fn trigger(&self) -> Option<String> {
        self.get_property_string(names::TRIGGER)
    }

    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.get_property_string(names::DESCRIPTION)
    }
}
