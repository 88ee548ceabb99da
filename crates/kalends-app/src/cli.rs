//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// kalends - read, expand and write iCalendar files
#[derive(Debug, Parser)]
#[command(name = "kalends")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter, overriding the configured level
    #[arg(long, global = true, env = "KALENDS_LOG")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise a calendar file
    Inspect {
        /// Path to an .ics file
        file: PathBuf,
    },

    /// List recurrence slots for every recurring event in a file
    Slots {
        /// Path to an .ics file
        file: PathBuf,

        /// Expansion bound (RFC 3339); defaults to each rule's UNTIL or the configured horizon
        #[arg(long)]
        until: Option<DateTime<Utc>>,

        /// Output slots as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a new calendar holding a single event
    New {
        #[arg(long)]
        summary: String,

        /// Event start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,

        /// Event end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,

        /// Event UID; a random one is generated when omitted
        #[arg(long)]
        uid: Option<String>,
    },
}
