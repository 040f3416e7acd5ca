//! # loadshed-engine
//!
//! Reconciles announced load-shedding stage events with the recurring
//! per-day, per-stage slot table into concrete outage windows for display.
//!
//! A single pass is a pure function of the dataset: no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`dataset`] — Input shape: events, day schedules, area label
//! - [`slot`] — `"HH:MM-HH:MM"` text → concrete instants, with midnight rollover
//! - [`matcher`] — Which slots of an event's day and stage apply, and how to report them
//! - [`grouper`] — Ordered event → windows mapping with per-event error isolation
//! - [`format`] — Humanized date-range labels
//! - [`render`] — One pass over a dataset → display list
//! - [`refresh`] — Refresh cadence state for repeated passes
//! - [`error`] — Error types

pub mod dataset;
pub mod error;
pub mod format;
pub mod grouper;
pub mod matcher;
pub mod refresh;
pub mod render;
pub mod slot;

pub use dataset::{Dataset, DaySchedule, OutageEvent};
pub use error::ReconcileError;
pub use format::{format_key, format_range};
pub use grouper::{group, EventKey, MatchResult};
pub use matcher::match_event;
pub use refresh::{FetchOutcome, RefreshPolicy, RefreshScheduler};
pub use render::{render, render_json, DisplayList, Period};
pub use slot::{parse_slot, ResolvedSlot};
