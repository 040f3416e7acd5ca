//! Group matched windows by event, preserving first-seen order.
//!
//! Events are keyed by their structured `(start, end, note)` triple. Two events
//! with an identical triple share a key: the later one's windows replace the
//! earlier one's (last write wins) and the key keeps its original position.
//!
//! A failure on one event never aborts the pass. The event is logged, left out
//! of the mapping, and recorded in [`MatchResult::skipped`].

use std::fmt;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::dataset::{wall_clock, DaySchedule, OutageEvent};
use crate::error::ReconcileError;
use crate::matcher;

/// Grouping identity of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub note: String,
}

impl EventKey {
    /// Machine-readable label, `"{start} - {end} ({note})"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl From<&OutageEvent> for EventKey {
    fn from(event: &OutageEvent) -> Self {
        Self {
            start: event.start,
            end: event.end,
            note: event.note.clone(),
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.start.format(wall_clock::FORMAT),
            self.end.format(wall_clock::FORMAT),
            self.note
        )
    }
}

/// An event that could not be reconciled, with the reason.
///
/// `label` is the [`EventKey`] label, or the raw JSON for a record that never
/// became an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    pub label: String,
    pub reason: String,
}

/// Ordered mapping from event key to its display windows.
///
/// Equality compares entries in order, not just as a set.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    windows: IndexMap<EventKey, Vec<String>>,
    skipped: Vec<SkippedEvent>,
}

impl MatchResult {
    /// Windows matched for `key`, if the event was reconciled.
    pub fn get(&self, key: &EventKey) -> Option<&[String]> {
        self.windows.get(key).map(Vec::as_slice)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EventKey, &[String])> {
        self.windows.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &EventKey> {
        self.windows.keys()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Events left out of the mapping, in processing order.
    pub fn skipped(&self) -> &[SkippedEvent] {
        &self.skipped
    }

    pub(crate) fn skip(&mut self, label: String, error: &ReconcileError) {
        warn!(event = %label, error = %error, "skipping event");
        self.skipped.push(SkippedEvent {
            label,
            reason: error.to_string(),
        });
    }
}

impl PartialEq for MatchResult {
    fn eq(&self, other: &Self) -> bool {
        self.windows.len() == other.windows.len()
            && self.windows.iter().eq(other.windows.iter())
            && self.skipped == other.skipped
    }
}

impl Eq for MatchResult {}

/// Reconcile `events` in the order given.
///
/// Callers wanting chronological output sort by `start` first (the render
/// driver does).
pub fn group(events: &[OutageEvent], days: &[DaySchedule]) -> MatchResult {
    let mut result = MatchResult::default();
    group_into(&mut result, events, days);
    result
}

pub(crate) fn group_into(result: &mut MatchResult, events: &[OutageEvent], days: &[DaySchedule]) {
    for event in events {
        let key = EventKey::from(event);
        match matcher::match_event(event, days) {
            Ok(windows) => {
                if let Some(previous) = result.windows.insert(key.clone(), windows) {
                    debug!(
                        key = %key,
                        replaced = previous.len(),
                        "duplicate event key, keeping latest windows"
                    );
                }
            }
            Err(e) => result.skip(key.label(), &e),
        }
    }
}
