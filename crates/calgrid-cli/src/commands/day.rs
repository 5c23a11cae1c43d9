//! Day command: list or search one day's events.
//!
//! Results are ordered by start time. The `#N` shown for each event is its
//! stored position, which is what `edit`, `remove` and `move` take.

use std::io::Write;

use anyhow::Result;
use calgrid_core::{Calendar, DateKey, DayEntry, SnapshotPort};

/// Runs the day command.
pub fn run<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &Calendar<P>,
    date: &DateKey,
    query: &str,
    json: bool,
) -> Result<()> {
    let entries = calendar.search(date, query);

    if json {
        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        return Ok(());
    }

    if entries.is_empty() {
        if query.is_empty() {
            writeln!(writer, "No events on {date}.")?;
        } else {
            writeln!(writer, "No events on {date} matching {query:?}.")?;
        }
        return Ok(());
    }

    writeln!(writer, "{}", date.decode().format("%A, %B %-d, %Y"))?;
    for entry in &entries {
        write_entry(writer, entry)?;
    }
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, entry: &DayEntry<'_>) -> Result<()> {
    let event = entry.event;
    write!(
        writer,
        "#{:<3} {}-{}  {} [{}]",
        entry.index, event.start_time, event.end_time, event.title, event.category
    )?;
    if event.description.is_empty() {
        writeln!(writer)?;
    } else {
        writeln!(writer, " - {}", event.description)?;
    }
    Ok(())
}
