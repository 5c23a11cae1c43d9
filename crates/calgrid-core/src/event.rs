//! Timed events attached to a single calendar day.

use serde::{Deserialize, Serialize};

use crate::overlap::Interval;
use crate::types::{Category, TimeOfDay, ValidationError};

/// A validated event.
///
/// Events carry no identity; they are addressed by their position within a
/// day's bucket. Snapshots use camelCase keys (`startTime`, `endTime`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventDraft")]
pub struct Event {
    pub title: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub description: String,
    pub category: Category,
}

impl Event {
    /// The event's `[start, end)` interval.
    pub const fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }

    /// Returns true if `query` (already case-folded) occurs in the title or description.
    pub(crate) fn matches_folded(&self, folded_query: &str) -> bool {
        self.title.to_lowercase().contains(folded_query)
            || self.description.to_lowercase().contains(folded_query)
    }
}

/// Unvalidated event input, as typed into a form.
///
/// Times are kept as raw text so that a blank or malformed field can be
/// reported instead of silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl EventDraft {
    /// Creates a draft with the required fields and an empty description.
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Checks required fields and the time range, producing an [`Event`].
    pub fn validate(&self) -> Result<Event, ValidationError> {
        require("title", &self.title)?;
        require("start time", &self.start_time)?;
        require("end time", &self.end_time)?;

        let start_time: TimeOfDay = self.start_time.trim().parse()?;
        let end_time: TimeOfDay = self.end_time.trim().parse()?;
        if end_time <= start_time {
            return Err(ValidationError::EndNotAfterStart {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Event {
            title: self.title.clone(),
            start_time,
            end_time,
            description: self.description.clone(),
            category: self.category,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

impl TryFrom<EventDraft> for Event {
    type Error = ValidationError;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            start_time: event.start_time.to_string(),
            end_time: event.end_time.to_string(),
            description: event.description.clone(),
            category: event.category,
        }
    }
}
