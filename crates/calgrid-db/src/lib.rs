//! Storage layer for calgrid.
//!
//! Persists calendar snapshots using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared across
//! threads without external synchronization. calgrid assumes a single active session.
//!
//! # Schema
//!
//! Snapshots live in a key-value table. Each row holds one complete snapshot as a
//! JSON document of the form `{ "YYYY-MM-DD": [event, ...] }`, with events written
//! as `{title, startTime, endTime, description, category}`. Saving replaces the row
//! wholesale; there are no partial updates.
//!
//! `updated_at` is stored as ISO 8601 text (e.g., `2024-01-15T10:30:00Z`).

use std::path::Path;

use calgrid_core::{Snapshot, SnapshotPort};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Key used for the snapshot when none is configured.
pub const DEFAULT_SNAPSHOT_KEY: &str = "calendarEvents";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to encode a snapshot.
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// A stored snapshot could not be decoded.
    #[error("invalid snapshot stored under {key}")]
    InvalidSnapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Snapshots table: one full calendar snapshot per key
            -- data: JSON object mapping YYYY-MM-DD to an array of events
            -- updated_at: ISO 8601 format (e.g., '2024-01-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the snapshot stored under `key`, if any.
    pub fn load_snapshot(&self, key: &str) -> Result<Option<Snapshot>, DbError> {
        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM snapshots WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(data) = data else {
            tracing::debug!(key, "no stored snapshot");
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&data).map_err(|source| DbError::InvalidSnapshot {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(snapshot))
    }

    /// Replaces the snapshot stored under `key`.
    pub fn save_snapshot(&self, key: &str, snapshot: &Snapshot) -> Result<(), DbError> {
        let data = serde_json::to_string(snapshot)?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO snapshots (key, data, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
            ",
            params![key, data, updated_at],
        )?;
        tracing::debug!(key, days = snapshot.len(), "stored snapshot");
        Ok(())
    }

    /// Returns when the snapshot under `key` was last written.
    pub fn snapshot_updated_at(&self, key: &str) -> Result<Option<String>, DbError> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM snapshots WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

/// A [`Database`] bound to one snapshot key, usable as a calendar's storage.
pub struct SnapshotSlot {
    db: Database,
    key: String,
}

impl SnapshotSlot {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn database(&self) -> &Database {
        &self.db
    }
}

impl SnapshotPort for SnapshotSlot {
    type Error = DbError;

    fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
        self.db.load_snapshot(&self.key)
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.db.save_snapshot(&self.key, snapshot)
    }
}
