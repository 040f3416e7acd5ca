//! Match one outage event against the recurring slots of its day and stage.
//!
//! Classification per slot, with the event as `[start, end)`:
//!
//! - **Contained** (`start >= slot.start && end <= slot.end`): report the event's
//!   own start time with the slot's nominal end, e.g. `"09:15-11:00"`. Outages
//!   are announced to run until the scheduled slot boundary even when they
//!   start late inside it.
//! - **Overlapping** (`start < slot.end && end > slot.start`, not contained):
//!   report the slot text unchanged.
//! - **Disjoint**: nothing.
//!
//! An event ending exactly on a slot's end counts as contained.

use chrono::NaiveDateTime;
use tracing::trace;

use crate::dataset::{DaySchedule, OutageEvent};
use crate::error::{ReconcileError, Result};
use crate::slot::{self, ResolvedSlot};

/// How an event relates to one resolved slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMatch {
    Contained,
    Overlapping,
    Disjoint,
}

/// Classify `[start, end)` against `slot`. Containment is checked first.
pub fn classify(start: NaiveDateTime, end: NaiveDateTime, slot: &ResolvedSlot) -> SlotMatch {
    if slot.contains(start, end) {
        SlotMatch::Contained
    } else if slot.overlaps(start, end) {
        SlotMatch::Overlapping
    } else {
        SlotMatch::Disjoint
    }
}

/// Extract the stage number: the first run of ASCII digits in `note`.
///
/// # Errors
/// Returns `ReconcileError::MissingStage` if `note` has no digits, or the digit
/// run does not fit a `u32`.
pub fn stage_number(note: &str) -> Result<u32> {
    note.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
        .ok_or_else(|| ReconcileError::MissingStage(note.to_string()))
}

/// Compute the display windows that apply to `event`.
///
/// Returns an empty list when no [`DaySchedule`] exists for the event's start
/// date, or when no slot overlaps the event. Every schedule entry dated on that
/// day is scanned, in order.
///
/// # Errors
/// - `InvertedRange` if the event does not end after it starts.
/// - `MissingStage` if the note carries no stage number.
/// - `StageOutOfRange` if a matching day has no slot list for that stage.
/// - `MalformedSlot` if a slot in the selected list cannot be parsed.
pub fn match_event(event: &OutageEvent, days: &[DaySchedule]) -> Result<Vec<String>> {
    if event.start >= event.end {
        return Err(ReconcileError::InvertedRange {
            start: event.start.to_string(),
            end: event.end.to_string(),
        });
    }
    let stage = stage_number(&event.note)?;
    let start_day = event.start.date();

    let mut windows = Vec::new();
    for day in days.iter().filter(|d| d.date == start_day) {
        let slots = stage_slots(day, stage)?;
        for raw in slots {
            let slot = slot::parse_slot(day.date, raw)?;
            let decision = classify(event.start, event.end, &slot);
            trace!(slot = %raw, ?decision, "classified slot");
            match decision {
                SlotMatch::Contained => windows.push(format!(
                    "{}-{}",
                    event.start.format("%H:%M"),
                    slot.end.format("%H:%M")
                )),
                SlotMatch::Overlapping => windows.push(slot.label()),
                SlotMatch::Disjoint => {}
            }
        }
    }

    Ok(windows)
}

fn stage_slots(day: &DaySchedule, stage: u32) -> Result<&[String]> {
    (stage as usize)
        .checked_sub(1)
        .and_then(|index| day.stages.get(index))
        .map(Vec::as_slice)
        .ok_or(ReconcileError::StageOutOfRange {
            stage,
            available: day.stages.len(),
        })
}
