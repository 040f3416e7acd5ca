//! Human-readable date ranges for event labels.
//!
//! Same calendar day:  `Wednesday, May 10 16:00 - 18:30 (Stage 2)`
//! Spanning days:      `Wednesday, May 10 22:00 - Thursday, May 11 00:30 (Stage 4)`
//!
//! Weekday and month names are long-form English; the day of month is not
//! zero-padded; times are 24-hour.

use chrono::NaiveDateTime;

use crate::grouper::EventKey;

const DAY_FORMAT: &str = "%A, %B %-d";
const TIME_FORMAT: &str = "%H:%M";

/// Render a range with its trailing `(note)`.
pub fn format_range(start: NaiveDateTime, end: NaiveDateTime, note: &str) -> String {
    let range = if start.date() == end.date() {
        format!(
            "{} {} - {}",
            start.format(DAY_FORMAT),
            start.format(TIME_FORMAT),
            end.format(TIME_FORMAT)
        )
    } else {
        format!(
            "{} {} - {} {}",
            start.format(DAY_FORMAT),
            start.format(TIME_FORMAT),
            end.format(DAY_FORMAT),
            end.format(TIME_FORMAT)
        )
    };
    format!("{} ({})", range, note)
}

/// Render the display label for a grouped event.
pub fn format_key(key: &EventKey) -> String {
    format_range(key.start, key.end, &key.note)
}
