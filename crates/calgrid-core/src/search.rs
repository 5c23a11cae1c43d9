//! Filtering a day's events by text.

use serde::Serialize;

use crate::event::Event;
use crate::store::EventStore;
use crate::types::DateKey;

/// A search hit, paired with its position in the day's bucket.
///
/// The position is what `edit` and `remove` expect, regardless of the
/// display order of the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayEntry<'a> {
    pub index: usize,
    pub event: &'a Event,
}

/// Returns the events whose title or description contains `query`,
/// ignoring case, ordered by start time.
///
/// Events with equal start times keep their insertion order. An empty query
/// matches every event.
pub fn search<'a>(events: &'a [Event], query: &str) -> Vec<DayEntry<'a>> {
    let folded = query.to_lowercase();
    let mut hits: Vec<DayEntry<'a>> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.matches_folded(&folded))
        .map(|(index, event)| DayEntry { index, event })
        .collect();
    hits.sort_by_key(|entry| entry.event.start_time);
    hits
}

impl EventStore {
    /// Searches one day's events; see [`search`].
    pub fn search(&self, date_key: &DateKey, query: &str) -> Vec<DayEntry<'_>> {
        search(self.events(date_key), query)
    }
}
