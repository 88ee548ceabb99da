//! iCalendar parsing error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for iCalendar parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Logical line number where the error occurred (1-based, 0 when unknown).
    pub line: usize,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns whether this is a structural grammar violation.
    ///
    /// Value-level failures and builder state errors are not malformations.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        self.kind.is_malformed()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind, self.line)?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// First logical line is not `BEGIN:VCALENDAR`.
    MissingCalendarBegin,
    /// An END line does not close the most recently opened component.
    MismatchedEnd,
    /// `BEGIN:VCALENDAR` appears inside the calendar.
    NestedCalendar,
    /// Components nested deeper than the parser accepts.
    InvalidNesting,
    /// Content line without a `:` separator.
    MissingColon,
    /// Content line with an empty property name.
    MissingPropertyName,
    /// Stream ended before `END:VCALENDAR`.
    UnexpectedEof,
    /// The tree builder reached a state with no defined transition.
    InvalidState,
    /// Invalid date or date-time value.
    InvalidDateTime,
    /// Invalid duration value.
    InvalidDuration,
    /// Invalid recurrence rule.
    InvalidRRule,
    /// Invalid frequency.
    InvalidFrequency,
    /// Invalid weekday.
    InvalidWeekday,
}

impl ParseErrorKind {
    /// Returns whether this kind is a structural grammar violation.
    #[must_use]
    pub const fn is_malformed(self) -> bool {
        matches!(
            self,
            Self::MissingCalendarBegin
                | Self::MismatchedEnd
                | Self::NestedCalendar
                | Self::InvalidNesting
                | Self::MissingColon
                | Self::MissingPropertyName
                | Self::UnexpectedEof
        )
    }

    /// Returns whether this kind signals an internal builder invariant violation.
    #[must_use]
    pub const fn is_state_error(self) -> bool {
        matches!(self, Self::InvalidState)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCalendarBegin => write!(f, "missing BEGIN:VCALENDAR"),
            Self::MismatchedEnd => write!(f, "mismatched BEGIN/END"),
            Self::NestedCalendar => write!(f, "nested VCALENDAR"),
            Self::InvalidNesting => write!(f, "invalid component nesting"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::UnexpectedEof => write!(f, "ran out of lines"),
            Self::InvalidState => write!(f, "invalid parser state"),
            Self::InvalidDateTime => write!(f, "invalid date-time format"),
            Self::InvalidDuration => write!(f, "invalid duration format"),
            Self::InvalidRRule => write!(f, "invalid recurrence rule"),
            Self::InvalidFrequency => write!(f, "invalid frequency"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
