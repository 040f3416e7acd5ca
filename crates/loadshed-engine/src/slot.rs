//! Resolve recurring `"HH:MM-HH:MM"` slot text against a calendar day.
//!
//! A slot whose end text sorts before its start text (e.g. `"23:00-01:00"`)
//! rolls over midnight: its end lands on the following day. The rollover test
//! compares the zero-padded strings, never the computed instants.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ReconcileError, Result};

const TIME_FORMAT: &str = "%H:%M";

/// A slot pinned to concrete instants on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub start: NaiveDateTime,
    /// Inclusive for containment checks, exclusive for overlap checks.
    pub end: NaiveDateTime,
}

impl ResolvedSlot {
    /// The slot's nominal `"HH:MM-HH:MM"` text.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }

    /// `[start, end)` lies entirely inside the slot.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start >= self.start && end <= self.end
    }

    /// `[start, end)` shares at least some time with the slot.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}

/// Resolve `slot_text` on `day`.
///
/// # Errors
/// Returns `ReconcileError::MalformedSlot` unless the text is two zero-padded
/// `HH:MM` times separated by `-`.
pub fn parse_slot(day: NaiveDate, slot_text: &str) -> Result<ResolvedSlot> {
    let (start_text, end_text) = slot_text
        .split_once('-')
        .ok_or_else(|| malformed(slot_text, "expected HH:MM-HH:MM"))?;
    let (start_text, end_text) = (start_text.trim(), end_text.trim());

    let start = day.and_time(parse_time_of_day(slot_text, start_text)?);
    let mut end = day.and_time(parse_time_of_day(slot_text, end_text)?);

    if end_text < start_text {
        end = end
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| malformed(slot_text, "rollover past the last representable date"))?;
    }

    Ok(ResolvedSlot { start, end })
}

/// Strict `HH:MM`: lexicographic rollover only works on zero-padded text.
fn parse_time_of_day(slot_text: &str, part: &str) -> Result<NaiveTime> {
    let bytes = part.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit);
    if !well_formed {
        return Err(malformed(slot_text, &format!("'{}' is not HH:MM", part)));
    }
    NaiveTime::parse_from_str(part, TIME_FORMAT)
        .map_err(|e| malformed(slot_text, &format!("'{}': {}", part, e)))
}

fn malformed(slot_text: &str, reason: &str) -> ReconcileError {
    ReconcileError::MalformedSlot {
        slot: slot_text.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 10).unwrap()
    }

    #[test]
    fn strict_time_accepts_padded() {
        let t = parse_time_of_day("x", "08:05").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 5, 0).unwrap());
    }

    #[test]
    fn strict_time_rejects_unpadded_and_out_of_range() {
        assert!(parse_time_of_day("x", "8:05").is_err());
        assert!(parse_time_of_day("x", "24:00").is_err());
        assert!(parse_time_of_day("x", "12:60").is_err());
        assert!(parse_time_of_day("x", "1a:00").is_err());
    }

    #[test]
    fn label_reproduces_slot_text() {
        let slot = parse_slot(day(), "22:00-00:30").unwrap();
        assert_eq!(slot.label(), "22:00-00:30");
    }

    #[test]
    fn whitespace_around_halves_is_trimmed() {
        let slot = parse_slot(day(), " 08:00 - 10:30 ").unwrap();
        assert_eq!(slot.label(), "08:00-10:30");
    }
}
