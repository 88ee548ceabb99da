//! RFC 5545 calendar document engine.
//!
//! Reads iCalendar streams into a typed component tree, writes the tree back
//! out, and expands recurring events into concrete time slots.

pub mod error;
pub mod rfc;
