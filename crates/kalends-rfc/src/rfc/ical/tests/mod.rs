//! Scenario tests for the calendar engine.

mod recurrence;
