//! Command-line argument definitions.

use std::path::PathBuf;

use calgrid_core::{CalendarMonth, Category, DateKey};
use clap::{Parser, Subcommand, ValueEnum};

/// Personal month calendar.
///
/// Keeps timed events per day and refuses events that overlap on the same day.
#[derive(Debug, Parser)]
#[command(name = "calgrid", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a month grid with event previews.
    Month {
        /// Month to show as YYYY-MM (default: current month).
        #[arg(long)]
        month: Option<CalendarMonth>,
    },

    /// List or search one day's events, ordered by start time.
    Day {
        /// Day as YYYY-MM-DD.
        date: DateKey,

        /// Only show events whose title or description contains this text.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add an event to a day.
    Add {
        /// Day as YYYY-MM-DD.
        date: DateKey,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Replace an event; omitted fields keep their current value.
    Edit {
        /// Day as YYYY-MM-DD.
        date: DateKey,

        /// Position of the event within the day (see `calgrid day`).
        index: usize,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Remove an event from a day.
    Remove {
        /// Day as YYYY-MM-DD.
        date: DateKey,

        /// Position of the event within the day.
        index: usize,
    },

    /// Move an event to another day.
    Move {
        /// Current day as YYYY-MM-DD.
        from: DateKey,

        /// Position of the event within the current day.
        index: usize,

        /// Destination day as YYYY-MM-DD.
        to: DateKey,
    },

    /// Export a month's events.
    Export {
        /// Output format.
        format: ExportFormat,

        /// Month to export as YYYY-MM (default: current month).
        #[arg(long)]
        month: Option<CalendarMonth>,

        /// Print to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },
}

/// Event fields shared by `add` and `edit`.
#[derive(Debug, Default, clap::Args)]
pub struct EventFields {
    /// Event title.
    #[arg(long)]
    pub title: Option<String>,

    /// Start time as HH:MM.
    #[arg(long)]
    pub start: Option<String>,

    /// End time as HH:MM.
    #[arg(long)]
    pub end: Option<String>,

    /// Free-form description.
    #[arg(long)]
    pub description: Option<String>,

    /// One of: work, personal, others.
    #[arg(long)]
    pub category: Option<Category>,
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// File extension for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}
