use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC parsing and accessor errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Invalid date-time in {property}: {value}")]
    InvalidDateTime { property: String, value: String },

    #[error("Calendar has no events")]
    NoEvents,
}

impl RfcError {
    /// Returns whether this error is a structural grammar violation that
    /// aborted parsing of the whole document.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Parse(e) if e.is_malformed())
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
