//! Event mutation commands: add, edit, remove and move.

use std::io::Write;

use anyhow::Result;
use calgrid_core::{
    Calendar, DateKey, Event, EventDraft, SnapshotPort, StoreError, first_conflict,
};

use crate::EventFields;

/// Builds a draft from command-line fields on top of `base`.
fn draft_from(fields: &EventFields, base: EventDraft) -> EventDraft {
    EventDraft {
        title: fields.title.clone().unwrap_or(base.title),
        start_time: fields.start.clone().unwrap_or(base.start_time),
        end_time: fields.end.clone().unwrap_or(base.end_time),
        description: fields.description.clone().unwrap_or(base.description),
        category: fields.category.unwrap_or(base.category),
    }
}

fn summary(event: &Event) -> String {
    format!("{} {}-{}", event.title, event.start_time, event.end_time)
}

/// Runs the add command.
pub fn add<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &mut Calendar<P>,
    date: &DateKey,
    fields: &EventFields,
) -> Result<()> {
    let draft = draft_from(fields, EventDraft::default());
    let index = calendar.add(date.clone(), &draft)?;
    let event = &calendar.events(date)[index];
    writeln!(writer, "Added #{index} on {date}: {}", summary(event))?;
    Ok(())
}

/// Runs the edit command. Fields not given keep their stored value.
pub fn edit<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &mut Calendar<P>,
    date: &DateKey,
    index: usize,
    fields: &EventFields,
) -> Result<()> {
    let events = calendar.events(date);
    let Some(current) = events.get(index) else {
        return Err(StoreError::Index {
            date_key: date.clone(),
            index,
            len: events.len(),
        }
        .into());
    };
    let draft = draft_from(fields, EventDraft::from(current));
    calendar.edit(date, index, &draft)?;
    let event = &calendar.events(date)[index];
    writeln!(writer, "Updated #{index} on {date}: {}", summary(event))?;
    Ok(())
}

/// Runs the remove command.
pub fn remove<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &mut Calendar<P>,
    date: &DateKey,
    index: usize,
) -> Result<()> {
    let removed = calendar.remove(date, index)?;
    writeln!(writer, "Removed {} from {date}", summary(&removed))?;
    Ok(())
}

/// Runs the move command.
///
/// Moves are not overlap-checked; a note is printed when the moved event
/// now overlaps another event on the destination day.
pub fn move_event<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &mut Calendar<P>,
    from: &DateKey,
    index: usize,
    to: &DateKey,
) -> Result<()> {
    let Some(new_index) = calendar.move_event(from, index, to)? else {
        writeln!(writer, "{from} is already the event's day; nothing moved.")?;
        return Ok(());
    };

    let destination = calendar.events(to);
    let moved = &destination[new_index];
    writeln!(
        writer,
        "Moved {} from {from} to {to} (now #{new_index})",
        summary(moved)
    )?;
    if let Some(other) = first_conflict(moved.interval(), destination, Some(new_index)) {
        writeln!(
            writer,
            "note: overlaps #{other} on {to}: {}",
            summary(&destination[other])
        )?;
    }
    Ok(())
}
