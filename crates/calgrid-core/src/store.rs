//! The date-keyed event store.
//!
//! Each day's bucket keeps insertion order; display order is computed on
//! read. Empty buckets are pruned immediately, so every key present in the
//! store has at least one event. A failed operation leaves the store as it was.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::event::{Event, EventDraft};
use crate::overlap::first_conflict;
use crate::types::{DateKey, TimeOfDay, ValidationError};

/// Full contents of the store, as persisted.
pub type Snapshot = BTreeMap<DateKey, Vec<Event>>;

/// Errors from store mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The event failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The event's time range overlaps an existing event on the same day.
    #[error("{start}-{end} on {date_key} overlaps existing event #{existing}")]
    Conflict {
        date_key: DateKey,
        start: TimeOfDay,
        end: TimeOfDay,
        /// Position of the first conflicting event in the day's bucket.
        existing: usize,
    },

    /// No event at the given position.
    #[error("no event #{index} on {date_key} ({len} events)")]
    Index {
        date_key: DateKey,
        index: usize,
        len: usize,
    },
}

/// A bounded view of one day's bucket, for compact grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPreview<'a> {
    /// Leading events in insertion order.
    pub events: &'a [Event],
    /// Number of events not shown.
    pub overflow: usize,
}

/// Mapping from date key to that day's events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    days: Snapshot,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a persisted snapshot, dropping empty buckets.
    pub fn from_snapshot(mut snapshot: Snapshot) -> Self {
        snapshot.retain(|_, events| !events.is_empty());
        Self { days: snapshot }
    }

    pub const fn snapshot(&self) -> &Snapshot {
        &self.days
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.days
    }

    /// Events on `date_key` in insertion order; empty if the day has none.
    pub fn events(&self, date_key: &DateKey) -> &[Event] {
        self.days.get(date_key).map_or(&[], Vec::as_slice)
    }

    pub fn contains_key(&self, date_key: &DateKey) -> bool {
        self.days.contains_key(date_key)
    }

    /// Iterates non-empty days in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (&DateKey, &[Event])> {
        self.days.iter().map(|(key, events)| (key, events.as_slice()))
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Adds an event to the end of the day's bucket.
    ///
    /// Returns the new event's position.
    pub fn add(&mut self, date_key: DateKey, draft: &EventDraft) -> Result<usize, StoreError> {
        let event = draft.validate()?;
        let existing = self.events(&date_key);
        check_conflict(&date_key, &event, existing, None)?;

        let bucket = self.days.entry(date_key.clone()).or_default();
        bucket.push(event);
        let index = bucket.len() - 1;
        tracing::debug!(date_key = %date_key, index, "added event");
        Ok(index)
    }

    /// Replaces the event at `index`, returning the previous value.
    ///
    /// The replaced event is excluded from the overlap check, so an event can
    /// be re-saved with its own time range.
    pub fn edit(
        &mut self,
        date_key: &DateKey,
        index: usize,
        draft: &EventDraft,
    ) -> Result<Event, StoreError> {
        let event = draft.validate()?;
        let existing = self.events(date_key);
        check_index(date_key, index, existing.len())?;
        check_conflict(date_key, &event, existing, Some(index))?;

        let slot = self
            .days
            .get_mut(date_key)
            .and_then(|bucket| bucket.get_mut(index))
            .ok_or_else(|| index_error(date_key, index, 0))?;
        let previous = std::mem::replace(slot, event);
        tracing::debug!(date_key = %date_key, index, "edited event");
        Ok(previous)
    }

    /// Removes the event at `index`, pruning the day if it becomes empty.
    pub fn remove(&mut self, date_key: &DateKey, index: usize) -> Result<Event, StoreError> {
        let len = self.events(date_key).len();
        check_index(date_key, index, len)?;

        let Some(bucket) = self.days.get_mut(date_key) else {
            return Err(index_error(date_key, index, 0));
        };
        let removed = bucket.remove(index);
        if bucket.is_empty() {
            self.days.remove(date_key);
        }
        tracing::debug!(date_key = %date_key, index, "removed event");
        Ok(removed)
    }

    /// Moves one event to the end of another day's bucket.
    ///
    /// Moving within the same day is a no-op and returns `Ok(None)`. Otherwise
    /// returns the event's position in the destination bucket.
    ///
    /// No overlap check is made: an event may land on a day where it
    /// conflicts with existing events.
    pub fn move_event(
        &mut self,
        from: &DateKey,
        index: usize,
        to: &DateKey,
    ) -> Result<Option<usize>, StoreError> {
        if from == to {
            return Ok(None);
        }
        let event = self.remove(from, index)?;
        let bucket = self.days.entry(to.clone()).or_default();
        bucket.push(event);
        let new_index = bucket.len() - 1;
        tracing::debug!(from = %from, index, to = %to, new_index, "moved event");
        Ok(Some(new_index))
    }

    /// The first `limit` events of a day plus the count of the rest.
    pub fn preview(&self, date_key: &DateKey, limit: usize) -> DayPreview<'_> {
        let events = self.events(date_key);
        let shown = events.len().min(limit);
        DayPreview {
            events: &events[..shown],
            overflow: events.len() - shown,
        }
    }
}

fn check_index(date_key: &DateKey, index: usize, len: usize) -> Result<(), StoreError> {
    if index >= len {
        return Err(index_error(date_key, index, len));
    }
    Ok(())
}

fn index_error(date_key: &DateKey, index: usize, len: usize) -> StoreError {
    StoreError::Index {
        date_key: date_key.clone(),
        index,
        len,
    }
}

fn check_conflict(
    date_key: &DateKey,
    event: &Event,
    existing: &[Event],
    skip: Option<usize>,
) -> Result<(), StoreError> {
    match first_conflict(event.interval(), existing, skip) {
        Some(position) => Err(StoreError::Conflict {
            date_key: date_key.clone(),
            start: event.start_time,
            end: event.end_time,
            existing: position,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn draft(title: &str, start: &str, end: &str) -> EventDraft {
        EventDraft::new(title, start, end)
    }

    fn titles(store: &EventStore, date_key: &str) -> Vec<String> {
        store
            .events(&key(date_key))
            .iter()
            .map(|e| e.title.clone())
            .collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");

        assert_eq!(store.add(day.clone(), &draft("Gym", "09:00", "10:00")), Ok(0));
        assert_eq!(store.add(day.clone(), &draft("Call", "08:00", "08:30")), Ok(1));

        assert_eq!(titles(&store, "2024-03-10"), vec!["Gym", "Call"]);
        assert_eq!(store.event_count(), 2);
    }

    #[test]
    fn add_rejects_overlap_without_mutation() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("Meeting", "10:00", "11:00")).unwrap();
        let before = store.clone();

        let err = store
            .add(day.clone(), &draft("Overlap", "10:30", "10:45"))
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict { existing: 0, .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn add_accepts_touching_boundary() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("Meeting", "10:00", "11:00")).unwrap();

        assert!(store.add(day, &draft("Lunch", "11:00", "12:00")).is_ok());
    }

    #[test]
    fn add_rejects_invalid_draft_without_creating_day() {
        let mut store = EventStore::new();
        let err = store
            .add(key("2024-03-10"), &draft("", "10:00", "11:00"))
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::Validation(ValidationError::Empty { field: "title" })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn edit_rejects_invalid_draft_without_mutation() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("Gym", "09:00", "10:00")).unwrap();
        let before = store.clone();

        assert_eq!(
            store.edit(&day, 0, &draft("", "08:00", "09:00")),
            Err(StoreError::Validation(ValidationError::Empty { field: "title" }))
        );
        assert!(matches!(
            store.edit(&day, 0, &draft("Gym", "10:00", "09:00")),
            Err(StoreError::Validation(ValidationError::EndNotAfterStart { .. }))
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn overlap_is_checked_per_day() {
        let mut store = EventStore::new();
        store.add(key("2024-03-10"), &draft("A", "10:00", "11:00")).unwrap();
        assert!(store.add(key("2024-03-11"), &draft("B", "10:00", "11:00")).is_ok());
    }

    #[test]
    fn add_then_remove_prunes_day() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("Gym", "09:00", "10:00")).unwrap();

        let removed = store.remove(&day, 0).unwrap();

        assert_eq!(removed.title, "Gym");
        assert!(!store.contains_key(&day));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_out_of_range_is_index_error() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("Gym", "09:00", "10:00")).unwrap();

        assert_eq!(
            store.remove(&day, 1),
            Err(StoreError::Index {
                date_key: day.clone(),
                index: 1,
                len: 1
            })
        );
        assert!(matches!(
            store.remove(&key("2024-01-01"), 0),
            Err(StoreError::Index { len: 0, .. })
        ));
        assert_eq!(store.event_count(), 1);
    }

    #[test]
    fn edit_keeping_own_range_never_conflicts() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("Gym", "09:00", "10:00")).unwrap();

        let previous = store
            .edit(
                &day,
                0,
                &draft("Gym", "09:00", "10:00").description("leg day"),
            )
            .unwrap();

        assert_eq!(previous.description, "");
        assert_eq!(store.events(&day)[0].description, "leg day");
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("A", "08:00", "09:00")).unwrap();
        store.add(day.clone(), &draft("B", "10:00", "11:00")).unwrap();
        store.add(day.clone(), &draft("C", "12:00", "13:00")).unwrap();

        store
            .edit(&day, 1, &draft("B2", "14:00", "15:00").category(Category::Personal))
            .unwrap();

        assert_eq!(titles(&store, "2024-03-10"), vec!["A", "B2", "C"]);
        assert_eq!(store.events(&day)[1].category, Category::Personal);
    }

    #[test]
    fn edit_conflicting_with_other_event_fails() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("A", "08:00", "09:00")).unwrap();
        store.add(day.clone(), &draft("B", "10:00", "11:00")).unwrap();
        let before = store.clone();

        let err = store.edit(&day, 1, &draft("B", "08:30", "09:30")).unwrap_err();

        assert!(matches!(err, StoreError::Conflict { existing: 0, .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn edit_out_of_range_is_index_error() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("A", "08:00", "09:00")).unwrap();

        assert!(matches!(
            store.edit(&day, 3, &draft("A", "08:00", "09:00")),
            Err(StoreError::Index { index: 3, len: 1, .. })
        ));
        assert!(matches!(
            store.edit(&key("2024-03-11"), 0, &draft("A", "08:00", "09:00")),
            Err(StoreError::Index { len: 0, .. })
        ));
    }

    #[test]
    fn move_relocates_and_preserves_total() {
        let mut store = EventStore::new();
        let d1 = key("2024-03-10");
        let d2 = key("2024-03-12");
        store.add(d1.clone(), &draft("A", "08:00", "09:00")).unwrap();
        store.add(d1.clone(), &draft("B", "10:00", "11:00")).unwrap();
        store.add(d2.clone(), &draft("C", "12:00", "13:00")).unwrap();

        let new_index = store.move_event(&d1, 0, &d2).unwrap();

        assert_eq!(new_index, Some(1));
        assert_eq!(titles(&store, "2024-03-10"), vec!["B"]);
        assert_eq!(titles(&store, "2024-03-12"), vec!["C", "A"]);
        assert_eq!(store.event_count(), 3);
    }

    #[test]
    fn move_of_only_event_prunes_source() {
        let mut store = EventStore::new();
        let d1 = key("2024-03-10");
        let d2 = key("2024-03-12");
        store.add(d1.clone(), &draft("A", "08:00", "09:00")).unwrap();

        store.move_event(&d1, 0, &d2).unwrap();

        assert!(!store.contains_key(&d1));
        assert_eq!(store.events(&d2).len(), 1);
    }

    #[test]
    fn move_to_same_day_is_noop() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        store.add(day.clone(), &draft("A", "08:00", "09:00")).unwrap();
        let before = store.clone();

        assert_eq!(store.move_event(&day, 0, &day), Ok(None));
        assert_eq!(store, before);
    }

    #[test]
    fn move_skips_overlap_check() {
        let mut store = EventStore::new();
        let d1 = key("2024-03-10");
        let d2 = key("2024-03-12");
        store.add(d1.clone(), &draft("A", "10:00", "11:00")).unwrap();
        store.add(d2.clone(), &draft("B", "10:00", "11:00")).unwrap();

        assert_eq!(store.move_event(&d1, 0, &d2), Ok(Some(1)));
        assert_eq!(titles(&store, "2024-03-12"), vec!["B", "A"]);
    }

    #[test]
    fn move_out_of_range_leaves_store_unchanged() {
        let mut store = EventStore::new();
        let d1 = key("2024-03-10");
        store.add(d1.clone(), &draft("A", "10:00", "11:00")).unwrap();
        let before = store.clone();

        assert!(matches!(
            store.move_event(&d1, 5, &key("2024-03-11")),
            Err(StoreError::Index { index: 5, .. })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn from_snapshot_prunes_empty_days() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(key("2024-03-01"), Vec::new());
        snapshot.insert(
            key("2024-03-02"),
            vec![draft("A", "10:00", "11:00").validate().unwrap()],
        );

        let store = EventStore::from_snapshot(snapshot);

        assert_eq!(store.day_count(), 1);
        assert!(!store.contains_key(&key("2024-03-01")));
    }

    #[test]
    fn preview_limits_events_and_counts_overflow() {
        let mut store = EventStore::new();
        let day = key("2024-03-10");
        for (i, start) in ["08:00", "09:00", "10:00", "11:00"].iter().enumerate() {
            let end = format!("{}:30", &start[..2]);
            store.add(day.clone(), &draft(&format!("E{i}"), start, &end)).unwrap();
        }

        let preview = store.preview(&day, 2);
        assert_eq!(preview.events.len(), 2);
        assert_eq!(preview.events[0].title, "E0");
        assert_eq!(preview.overflow, 2);

        let empty = store.preview(&key("2024-03-11"), 2);
        assert!(empty.events.is_empty());
        assert_eq!(empty.overflow, 0);
    }
}
