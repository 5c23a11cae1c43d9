//! Time-overlap detection between events on the same day.
//!
//! A candidate interval `(ns, ne)` conflicts with an existing `(es, ee)` when
//! any of the following hold:
//!
//! - the candidate starts inside the existing interval: `ns >= es && ns < ee`
//! - the candidate ends inside the existing interval: `ne > es && ne <= ee`
//! - the candidate covers the existing interval: `ns <= es && ne >= ee`
//!
//! Touching boundaries do not conflict: an event starting exactly when
//! another ends is accepted. Two events starting at the same minute do.

use crate::event::Event;
use crate::types::TimeOfDay;

/// A time interval within one day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u16,
    pub end: u16,
}

impl Interval {
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start: start.minutes(),
            end: end.minutes(),
        }
    }

    /// Returns true if `self`, as a new candidate, conflicts with `existing`.
    pub const fn conflicts_with(self, existing: Self) -> bool {
        let (ns, ne) = (self.start, self.end);
        let (es, ee) = (existing.start, existing.end);
        (ns >= es && ns < ee) || (ne > es && ne <= ee) || (ns <= es && ne >= ee)
    }
}

/// Finds the first event in `events` that conflicts with `candidate`.
///
/// The event at position `skip`, if any, is left out of the comparison so an
/// event being edited is never checked against itself. Returns the position of
/// the conflicting event within `events`.
pub fn first_conflict(candidate: Interval, events: &[Event], skip: Option<usize>) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .find(|(_, event)| candidate.conflicts_with(event.interval()))
        .map(|(index, _)| index)
}
