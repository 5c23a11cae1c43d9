//! Shared utilities for CLI commands.

use anyhow::{Context, Result};
use calgrid_core::{Calendar, CalendarMonth};
use calgrid_db::{Database, SnapshotSlot};
use chrono::{Local, NaiveDate};

use crate::Config;

/// Opens the configured database and loads the calendar from it,
/// creating the database directory if needed.
pub fn open_calendar(config: &Config) -> Result<Calendar<SnapshotSlot>> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Calendar::open(SnapshotSlot::new(db, config.snapshot_key.clone()))
        .context("failed to load calendar")
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The requested month, or the month containing today.
pub fn month_or_current(month: Option<CalendarMonth>) -> Result<CalendarMonth> {
    match month {
        Some(month) => Ok(month),
        None => CalendarMonth::containing(today())
            .context("today's date is outside the supported calendar years"),
    }
}
