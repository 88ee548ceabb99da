//! iCalendar serialization (RFC 5545).
//!
//! This module provides serializers for iCalendar content:
//! - Escape: Text and parameter value escaping
//! - Serializer: Component tree to CRLF-terminated content lines

mod escape;
mod serializer;

pub use escape::{escape_param_value, escape_text};
pub use serializer::{serialize, serialize_component, serialize_property, serialize_to};
