//! Shared building blocks for the kalends workspace.
//!
//! - `config`: layered settings loading
//! - `constants`: product identifiers and engine defaults
//! - `error`: core error type
//! - `util`: date arithmetic and link extraction used by the calendar engine

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
