//! Core engine for the calgrid calendar.
//!
//! This crate contains:
//! - Date keys and wall-clock times with validation
//! - Month grid generation and month navigation
//! - The date-keyed event store and its overlap rule
//! - Day search and month exports (JSON, CSV)
//! - The calendar service that persists the store through a snapshot port

pub mod calendar;
pub mod event;
pub mod export;
pub mod grid;
pub mod overlap;
pub mod search;
pub mod store;
pub mod types;

pub use calendar::{Calendar, CalendarError, MemoryPort, SnapshotPort};
pub use event::{Event, EventDraft};
pub use export::{CSV_HEADER, export_csv, export_json};
pub use grid::{CalendarCell, CalendarMonth, month_grid};
pub use overlap::{Interval, first_conflict};
pub use search::{DayEntry, search};
pub use store::{DayPreview, EventStore, Snapshot, StoreError};
pub use types::{Category, DateKey, TimeOfDay, ValidationError};
