//! The calendar service: an [`EventStore`] bound to a persisted snapshot.
//!
//! The snapshot is read once by [`Calendar::open`] and rewritten wholesale
//! after every successful mutation. A mutation is applied to a working copy
//! first and only published once the snapshot has been saved, so neither a
//! rejected operation nor a failed save changes the visible state.

use std::convert::Infallible;
use std::error::Error as StdError;

use thiserror::Error;

use crate::event::{Event, EventDraft};
use crate::export::{export_csv, export_json};
use crate::grid::CalendarMonth;
use crate::search::DayEntry;
use crate::store::{DayPreview, EventStore, Snapshot, StoreError};
use crate::types::DateKey;

/// Key-value storage for the calendar snapshot.
pub trait SnapshotPort {
    type Error: StdError + Send + Sync + 'static;

    /// Reads the stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, Self::Error>;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

/// In-process snapshot storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPort {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    pub const fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Number of completed saves.
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotPort for MemoryPort {
    type Error = Infallible;

    fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Calendar service errors.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The snapshot could not be read or written.
    #[error("snapshot storage failed")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),

    #[error("failed to serialize export")]
    Export(#[from] serde_json::Error),
}

impl CalendarError {
    fn storage(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// One user's calendar.
#[derive(Debug)]
pub struct Calendar<P> {
    store: EventStore,
    port: P,
}

impl<P: SnapshotPort> Calendar<P> {
    /// Loads the calendar from `port`; a missing snapshot starts empty.
    pub fn open(port: P) -> Result<Self, CalendarError> {
        let store = port
            .load()
            .map_err(CalendarError::storage)?
            .map(EventStore::from_snapshot)
            .unwrap_or_default();
        tracing::debug!(
            days = store.day_count(),
            events = store.event_count(),
            "loaded calendar snapshot"
        );
        Ok(Self { store, port })
    }

    pub const fn store(&self) -> &EventStore {
        &self.store
    }

    pub const fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    pub fn add(&mut self, date_key: DateKey, draft: &EventDraft) -> Result<usize, CalendarError> {
        self.commit(|store| store.add(date_key, draft))
    }

    pub fn edit(
        &mut self,
        date_key: &DateKey,
        index: usize,
        draft: &EventDraft,
    ) -> Result<Event, CalendarError> {
        self.commit(|store| store.edit(date_key, index, draft))
    }

    pub fn remove(&mut self, date_key: &DateKey, index: usize) -> Result<Event, CalendarError> {
        self.commit(|store| store.remove(date_key, index))
    }

    /// Moves an event between days; see [`EventStore::move_event`].
    ///
    /// A same-day move writes nothing.
    pub fn move_event(
        &mut self,
        from: &DateKey,
        index: usize,
        to: &DateKey,
    ) -> Result<Option<usize>, CalendarError> {
        if from == to {
            return Ok(None);
        }
        self.commit(|store| store.move_event(from, index, to))
    }

    pub fn events(&self, date_key: &DateKey) -> &[Event] {
        self.store.events(date_key)
    }

    pub fn search(&self, date_key: &DateKey, query: &str) -> Vec<DayEntry<'_>> {
        self.store.search(date_key, query)
    }

    pub fn preview(&self, date_key: &DateKey, limit: usize) -> DayPreview<'_> {
        self.store.preview(date_key, limit)
    }

    pub fn export_json(&self, month: CalendarMonth) -> Result<String, CalendarError> {
        Ok(export_json(&self.store, month)?)
    }

    pub fn export_csv(&self, month: CalendarMonth) -> String {
        export_csv(&self.store, month)
    }

    fn commit<T>(
        &mut self,
        apply: impl FnOnce(&mut EventStore) -> Result<T, StoreError>,
    ) -> Result<T, CalendarError> {
        let mut working = self.store.clone();
        let value = apply(&mut working)?;
        self.port
            .save(working.snapshot())
            .map_err(CalendarError::storage)?;
        tracing::debug!(
            days = working.day_count(),
            events = working.event_count(),
            "saved calendar snapshot"
        );
        self.store = working;
        Ok(value)
    }
}
