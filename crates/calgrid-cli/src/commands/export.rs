//! Implementation of the `calgrid export` command.
//!
//! Exports one month's events as JSON or CSV, either to stdout or to
//! `events-<year>-<month>.<ext>` in the configured export directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calgrid_core::{Calendar, CalendarMonth, SnapshotPort};

use crate::ExportFormat;

/// Renders the export payload for `month`.
pub fn payload<P: SnapshotPort>(
    calendar: &Calendar<P>,
    format: ExportFormat,
    month: CalendarMonth,
) -> Result<String> {
    match format {
        ExportFormat::Json => calendar
            .export_json(month)
            .context("failed to serialize events"),
        ExportFormat::Csv => Ok(calendar.export_csv(month)),
    }
}

/// Writes the export file into `dir`, returning its path.
pub fn write_file<P: SnapshotPort>(
    calendar: &Calendar<P>,
    format: ExportFormat,
    month: CalendarMonth,
    dir: &Path,
) -> Result<PathBuf> {
    let contents = payload(calendar, format, month)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory: {}", dir.display()))?;
    let path = dir.join(month.export_file_name(format.extension()));
    fs::write(&path, contents)
        .with_context(|| format!("failed to write export file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), %month, "wrote export");
    Ok(path)
}

/// Runs the export command.
pub fn run<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &Calendar<P>,
    format: ExportFormat,
    month: CalendarMonth,
    dir: Option<&Path>,
) -> Result<()> {
    match dir {
        Some(dir) => {
            let path = write_file(calendar, format, month, dir)?;
            writeln!(writer, "Wrote {}", path.display())?;
        }
        None => writeln!(writer, "{}", payload(calendar, format, month)?)?,
    }
    Ok(())
}
