//! Recurrence expansion.
//!
//! Turns an RRULE plus an event's start and end into concrete slots.

mod rrule;

pub use rrule::SlotExpander;
