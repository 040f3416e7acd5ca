//! Input dataset shape: announced stage events, the per-day slot table, and the
//! area label.
//!
//! The layout mirrors what the upstream area endpoint delivers:
//!
//! ```json
//! {
//!   "events": [{ "start": "2023-05-10T16:00:00+02:00", "end": "2023-05-10T18:30:00+02:00", "note": "Stage 2" }],
//!   "info": { "name": "Plumstead (11)" },
//!   "schedule": { "days": [{ "date": "2023-05-10", "name": "Wednesday", "stages": [["02:00-04:30"], ["02:00-04:30", "18:00-20:30"]] }] }
//! }
//! ```
//!
//! All instants are naive wall-clock readings. An RFC 3339 offset on an event
//! timestamp is parsed and then dropped; no timezone conversion happens.
//!
//! Event records are kept as raw JSON until reconciliation, so a single bad
//! record is skipped on its own instead of failing the whole dataset.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ReconcileError, Result};

/// A single announced outage with its stage carried in `note` (e.g. "Stage 2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutageEvent {
    #[serde(with = "wall_clock")]
    pub start: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub end: NaiveDateTime,
    pub note: String,
}

/// An event record as delivered, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(pub serde_json::Value);

impl EventRecord {
    /// Validate the record into an [`OutageEvent`].
    ///
    /// # Errors
    /// Returns `ReconcileError::MalformedEvent` if a field is missing, mistyped,
    /// or a timestamp cannot be read.
    pub fn parse(&self) -> Result<OutageEvent> {
        OutageEvent::deserialize(&self.0).map_err(|e| ReconcileError::MalformedEvent {
            record: self.0.to_string(),
            reason: e.to_string(),
        })
    }
}

/// The recurring slot table for one calendar day.
///
/// `stages[0]` holds the slots for stage 1, `stages[1]` for stage 2, and so on.
/// Each slot is raw `"HH:MM-HH:MM"` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// Day name as labelled upstream (e.g. "Wednesday"). Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stages: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaInfo {
    pub name: String,
}

/// One fetched dataset, reconciled in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub events: Vec<EventRecord>,
    pub schedule: Schedule,
    pub info: AreaInfo,
}

impl Dataset {
    /// Parse a dataset from its JSON representation.
    ///
    /// # Errors
    /// Returns `ReconcileError::Dataset` if the JSON is invalid or the
    /// top-level shape (`events` array, `schedule.days`, `info.name`) is wrong.
    /// Individual event records are checked later, per event.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serde adapter for event timestamps.
///
/// Accepts RFC 3339 (`2023-05-10T16:00:00+02:00`, offset dropped) or naive
/// ISO-8601 with or without seconds and fractional seconds. Always writes
/// `%Y-%m-%dT%H:%M:%S`.
pub(crate) mod wall_clock {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(crate) const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&dt.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: '{}'", raw)))
    }

    pub(crate) fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()
    }

}
