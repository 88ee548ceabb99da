//! Core iCalendar types (RFC 5545).
//!
//! The calendar is a tree: a [`Calendar`] owns ordered properties and
//! components, and every component owns its own properties and children.
//! Typed accessors read and write that tree; nothing is cached beside it.

mod alarm;
mod attendee;
mod calendar;
mod component;
mod datetime;
mod event;
mod parameter;
mod property;
mod rrule;
mod timezone;
mod value_type;

pub use alarm::{AlarmAction, VAlarm};
pub use attendee::{Attendee, ParticipationStatus, strip_mailto};
pub use calendar::{Calendar, ProdVendor};
pub use component::{
    Component, ComponentBase, ComponentKind, ComponentLike, Daylight, Standard, UnknownComponent,
    VFreeBusy, VJournal, VTodo,
};
pub use datetime::{DATE_FORMAT, UTC_FORMAT, format_date, format_duration, format_utc};
pub use event::{Classification, EventStatus, Transparency, VEvent};
pub use parameter::{Parameter, names as param_names};
pub use property::{ContentLine, Property, names};
pub use rrule::{ByDay, Frequency, RRule, RRuleSlot, weekday_code, weekday_from_code};
pub use timezone::VTimezone;
pub use value_type::ValueType;
