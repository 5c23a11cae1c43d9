//! Month command: the calendar grid with per-day previews.
//!
//! Each current-month cell shows the day number, a `*` for today and the
//! day's event count in brackets. Leading padding is blank; trailing padding
//! shows its placeholder number in parentheses. Below the grid, every day
//! with events lists its first few events in insertion order.

use std::io::Write;

use anyhow::Result;
use calgrid_core::{
    Calendar, CalendarCell, CalendarMonth, DateKey, EventStore, SnapshotPort, month_grid,
};
use chrono::NaiveDate;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Runs the month command.
pub fn run<W: Write, P: SnapshotPort>(
    writer: &mut W,
    calendar: &Calendar<P>,
    month: CalendarMonth,
    today: NaiveDate,
    preview_limit: usize,
) -> Result<()> {
    render(writer, calendar.store(), month, today, preview_limit)
}

fn render<W: Write>(
    writer: &mut W,
    store: &EventStore,
    month: CalendarMonth,
    today: NaiveDate,
    preview_limit: usize,
) -> Result<()> {
    writeln!(writer, "{}", month.label())?;
    write_row(writer, WEEKDAYS.iter().map(ToString::to_string))?;

    let cells = month_grid(month);
    for week in cells.chunks(7) {
        write_row(writer, week.iter().map(|cell| cell_text(cell, store, today)))?;
    }

    let days: Vec<DateKey> = cells.iter().filter_map(CalendarCell::key).collect();
    let busy: Vec<&DateKey> = days.iter().filter(|key| store.contains_key(key)).collect();
    if busy.is_empty() {
        writeln!(writer, "No events this month.")?;
        return Ok(());
    }

    writeln!(writer, "Events:")?;
    for key in busy {
        let preview = store.preview(key, preview_limit);
        let mut items: Vec<String> = preview
            .events
            .iter()
            .map(|event| format!("{} {}", event.start_time, event.title))
            .collect();
        if preview.overflow > 0 {
            items.push(format!("+{} more", preview.overflow));
        }
        writeln!(writer, "{key}  {}", items.join(", "))?;
    }

    Ok(())
}

fn cell_text(cell: &CalendarCell, store: &EventStore, today: NaiveDate) -> String {
    match (cell.day_number, cell.key()) {
        (Some(day), Some(key)) => {
            let mark = if cell.is_today(today) { '*' } else { ' ' };
            let count = store.events(&key).len();
            if count == 0 {
                format!("{day:>2}{mark}")
            } else {
                format!("{day:>2}{mark}[{count}]")
            }
        }
        (Some(placeholder), None) => format!("({placeholder})"),
        (None, _) => String::new(),
    }
}

fn write_row<W: Write>(writer: &mut W, cells: impl Iterator<Item = String>) -> Result<()> {
    let mut line = String::from("|");
    for cell in cells {
        line.push_str(&format!(" {cell:<6} |"));
    }
    writeln!(writer, "{line}")?;
    Ok(())
}
