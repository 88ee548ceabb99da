//! iCalendar RFC 5545 implementation.
//!
//! This module provides the calendar document engine:
//!
//! - `core`: The component tree, typed accessors and recurrence rules
//! - `parse`: Line unfolding, the property codec and the tree builder
//! - `build`: Escaping and serialization back to text
//! - `expand`: Recurrence expansion into concrete slots
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kalends_rfc::rfc::ical::core::{Calendar, ComponentLike};
//!
//! let mut calendar = Calendar::new();
//! let event = calendar.add_event("team-sync@example.com").unwrap();
//! event.set_summary("Team sync");
//! event.set_start_at(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
//! event.set_end_at(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
//!
//! let text = calendar.serialize();
//! let reparsed: Calendar = text.parse().unwrap();
//! assert_eq!(reparsed.events().len(), 1);
//! ```

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::serialize;
pub use self::core::{Calendar, Component, ComponentKind, ComponentLike, Parameter, Property, VEvent};
pub use parse::{ParseError, ParseErrorKind, ParseResult, parse};
