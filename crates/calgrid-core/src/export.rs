//! JSON and CSV exports of one displayed month.
//!
//! A day belongs to the export iff its key's year and month equal the
//! displayed month's; grid padding plays no part. Days appear in
//! chronological order.
//!
//! The CSV form joins fields with bare commas and does no quoting or
//! escaping. A title or description containing a comma or newline produces a
//! row that will not parse back into six columns.

use std::collections::BTreeMap;

use crate::event::Event;
use crate::grid::CalendarMonth;
use crate::store::EventStore;
use crate::types::DateKey;

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "Date,Title,Start Time,End Time,Description,Category";

fn month_days(
    store: &EventStore,
    month: CalendarMonth,
) -> impl Iterator<Item = (&DateKey, &[Event])> {
    store.days().filter(move |(key, _)| month.contains(key))
}

/// Pretty-printed `{ dateKey: [event, ...] }` for the month.
pub fn export_json(store: &EventStore, month: CalendarMonth) -> Result<String, serde_json::Error> {
    let days: BTreeMap<&DateKey, &[Event]> = month_days(store, month).collect();
    serde_json::to_string_pretty(&days)
}

/// Header plus one row per event for the month, newline-separated.
pub fn export_csv(store: &EventStore, month: CalendarMonth) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    for (key, events) in month_days(store, month) {
        lines.extend(events.iter().map(|event| {
            format!(
                "{key},{},{},{},{},{}",
                event.title, event.start_time, event.end_time, event.description, event.category
            )
        }));
    }
    lines.join("\n")
}
