//! iCalendar component types (RFC 5545 §3.4-3.6).

use chrono::{DateTime, Utc};

use super::{Property, VAlarm, VEvent, VTimezone};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::parse::parse_timestamp;

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Unknown/X-component.
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage shared by every component: properties and nested components,
/// both in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentBase {
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

/// Behaviour common to the calendar and all of its components.
///
/// Implementors only provide their token and storage; everything else is
/// derived from those.
pub trait ComponentLike {
    /// Component token as written on BEGIN/END lines.
    fn token(&self) -> &str;

    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Properties in order of appearance.
    fn properties(&self) -> &[Property] {
        &self.base().properties
    }

    /// Nested components in order of appearance.
    fn components(&self) -> &[Component] {
        &self.base().components
    }

    /// Returns the first property called `name`.
    fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.name_is(name))
    }

    /// Returns every property called `name`.
    fn get_properties(&self, name: &str) -> Vec<&Property> {
        self.properties().iter().filter(|p| p.name_is(name)).collect()
    }

    /// Returns the value of the first property called `name`.
    fn get_property_string(&self, name: &str) -> Option<String> {
        self.get_property(name).map(|p| p.value.clone())
    }

    /// Reads the first property called `name` as a UTC timestamp.
    ///
    /// ## Errors
    /// Returns `PropertyNotFound` if the property is absent and
    /// `InvalidDateTime` if its value is not a DATE or DATE-TIME.
    fn get_property_time(&self, name: &str) -> RfcResult<DateTime<Utc>> {
        let property = self
            .get_property(name)
            .ok_or_else(|| RfcError::PropertyNotFound(name.to_string()))?;
        parse_timestamp(&property.value, 0).map_err(|e| {
            tracing::debug!(property = name, error = %e, "Unreadable timestamp");
            RfcError::InvalidDateTime {
                property: name.to_string(),
                value: property.value.clone(),
            }
        })
    }

    /// Updates the first property with the same name in place, or appends
    /// the property if there is none.
    fn set_property(&mut self, property: Property) {
        let properties = &mut self.base_mut().properties;
        match properties.iter_mut().find(|p| p.name_is(&property.name)) {
            Some(existing) => {
                existing.value = property.value;
                existing.params = property.params;
            }
            None => properties.push(property),
        }
    }

    /// Appends a property, keeping any existing ones with the same name.
    fn add_property(&mut self, property: Property) {
        self.base_mut().properties.push(property);
    }

    /// Appends a nested component.
    fn add_component(&mut self, component: Component) {
        self.base_mut().components.push(component);
    }
}

macro_rules! impl_component_like {
    ($ty:ty, $kind:expr) => {
        impl $crate::rfc::ical::core::ComponentLike for $ty {
            fn token(&self) -> &str {
                $kind.as_str()
            }

            fn base(&self) -> &$crate::rfc::ical::core::ComponentBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::rfc::ical::core::ComponentBase {
                &mut self.base
            }
        }
    };
}
pub(crate) use impl_component_like;

macro_rules! simple_component {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            base: ComponentBase,
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl_component_like!($name, $kind);
    };
}

simple_component!(
    /// A VTODO, kept structurally.
    VTodo,
    ComponentKind::Todo
);
simple_component!(
    /// A VJOURNAL, kept structurally.
    VJournal,
    ComponentKind::Journal
);
simple_component!(
    /// A VFREEBUSY, kept structurally.
    VFreeBusy,
    ComponentKind::FreeBusy
);
simple_component!(
    /// STANDARD observance inside a VTIMEZONE.
    Standard,
    ComponentKind::Standard
);
simple_component!(
    /// DAYLIGHT observance inside a VTIMEZONE.
    Daylight,
    ComponentKind::Daylight
);

/// A component the engine does not interpret.
///
/// The original token is kept so it re-serializes unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponent {
    token: String,
    base: ComponentBase,
}

impl UnknownComponent {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base: ComponentBase::default(),
        }
    }
}

impl ComponentLike for UnknownComponent {
    fn token(&self) -> &str {
        &self.token
    }

    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

/// Any component that can appear inside a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Event(VEvent),
    Todo(VTodo),
    Journal(VJournal),
    FreeBusy(VFreeBusy),
    Timezone(VTimezone),
    Alarm(VAlarm),
    Standard(Standard),
    Daylight(Daylight),
    Unknown(UnknownComponent),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            Component::Event($c) => $body,
            Component::Todo($c) => $body,
            Component::Journal($c) => $body,
            Component::FreeBusy($c) => $body,
            Component::Timezone($c) => $body,
            Component::Alarm($c) => $body,
            Component::Standard($c) => $body,
            Component::Daylight($c) => $body,
            Component::Unknown($c) => $body,
        }
    };
}

impl Component {
    /// Creates an empty component for a BEGIN token.
    ///
    /// Unrecognised tokens, including a stray `VCALENDAR`, become
    /// [`Component::Unknown`] with the token preserved as written.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match ComponentKind::parse(token) {
            ComponentKind::Event => Self::Event(VEvent::default()),
            ComponentKind::Todo => Self::Todo(VTodo::new()),
            ComponentKind::Journal => Self::Journal(VJournal::new()),
            ComponentKind::FreeBusy => Self::FreeBusy(VFreeBusy::new()),
            ComponentKind::Timezone => Self::Timezone(VTimezone::default()),
            ComponentKind::Alarm => Self::Alarm(VAlarm::new()),
            ComponentKind::Standard => Self::Standard(Standard::new()),
            ComponentKind::Daylight => Self::Daylight(Daylight::new()),
            ComponentKind::Calendar | ComponentKind::Unknown => {
                Self::Unknown(UnknownComponent::new(token))
            }
        }
    }

    /// Returns the kind of this component.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Event(_) => ComponentKind::Event,
            Self::Todo(_) => ComponentKind::Todo,
            Self::Journal(_) => ComponentKind::Journal,
            Self::FreeBusy(_) => ComponentKind::FreeBusy,
            Self::Timezone(_) => ComponentKind::Timezone,
            Self::Alarm(_) => ComponentKind::Alarm,
            Self::Standard(_) => ComponentKind::Standard,
            Self::Daylight(_) => ComponentKind::Daylight,
            Self::Unknown(_) => ComponentKind::Unknown,
        }
    }

    #[must_use]
    pub const fn as_event(&self) -> Option<&VEvent> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut VEvent> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_timezone(&self) -> Option<&VTimezone> {
        match self {
            Self::Timezone(tz) => Some(tz),
            _ => None,
        }
    }

    pub fn as_timezone_mut(&mut self) -> Option<&mut VTimezone> {
        match self {
            Self::Timezone(tz) => Some(tz),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_alarm(&self) -> Option<&VAlarm> {
        match self {
            Self::Alarm(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_alarm_mut(&mut self) -> Option<&mut VAlarm> {
        match self {
            Self::Alarm(a) => Some(a),
            _ => None,
        }
    }
}

impl ComponentLike for Component {
    fn token(&self) -> &str {
        dispatch!(self, c => c.token())
    }

    fn base(&self) -> &ComponentBase {
        dispatch!(self, c => c.base())
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        dispatch!(self, c => c.base_mut())
    }
}

impl From<VEvent> for Component {
    fn from(event: VEvent) -> Self {
        Self::Event(event)
    }
}

impl From<VTimezone> for Component {
    fn from(tz: VTimezone) -> Self {
        Self::Timezone(tz)
    }
}

impl From<VAlarm> for Component {
    fn from(alarm: VAlarm) -> Self {
        Self::Alarm(alarm)
    }
}
