//! Property-based tests for slot resolution and event matching.
//!
//! These check invariants over arbitrary slot times and event ranges rather
//! than the hand-picked cases in the other test files.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use loadshed_engine::matcher::{classify, SlotMatch};
use loadshed_engine::{group, match_event, parse_slot, DaySchedule, OutageEvent};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Minutes since midnight, on a half-hour grid like real schedules.
fn arb_minute() -> impl Strategy<Value = u32> {
    (0u32..48).prop_map(|n| n * 30)
}

fn hhmm(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

fn at(day: NaiveDate, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

fn single_slot_day(day: NaiveDate, slot: String) -> Vec<DaySchedule> {
    vec![DaySchedule {
        date: day,
        name: None,
        stages: vec![vec![slot]],
    }]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rollover_iff_end_text_sorts_first(day in arb_date(), s in arb_minute(), e in arb_minute()) {
        let slot = parse_slot(day, &format!("{}-{}", hhmm(s), hhmm(e))).unwrap();

        prop_assert_eq!(slot.start.date(), day);
        if e < s {
            prop_assert_eq!(slot.end.date(), day + Duration::days(1));
        } else {
            prop_assert_eq!(slot.end.date(), day);
        }
        prop_assert!(slot.end >= slot.start);
    }

    #[test]
    fn resolved_slot_label_round_trips_text(
        day in arb_date(),
        s in arb_minute(),
        e in arb_minute(),
    ) {
        let text = format!("{}-{}", hhmm(s), hhmm(e));
        prop_assert_eq!(parse_slot(day, &text).unwrap().label(), text);
    }

    #[test]
    fn contained_implies_overlapping_or_empty(
        day in arb_date(),
        s in arb_minute(),
        e in arb_minute(),
        ev_start in arb_minute(),
        len in 1u32..=600,
    ) {
        let slot = parse_slot(day, &format!("{}-{}", hhmm(s), hhmm(e))).unwrap();
        let start = at(day, ev_start);
        let end = start + Duration::minutes(i64::from(len));

        if classify(start, end, &slot) == SlotMatch::Contained && slot.start < slot.end {
            prop_assert!(slot.overlaps(start, end));
        }
    }

    #[test]
    fn at_most_one_window_per_slot(
        day in arb_date(),
        s in arb_minute(),
        e in arb_minute(),
        ev_start in arb_minute(),
        len in 1u32..=600,
    ) {
        let raw = format!("{}-{}", hhmm(s), hhmm(e));
        let days = single_slot_day(day, raw.clone());
        let start = at(day, ev_start);
        let event = OutageEvent {
            start,
            end: start + Duration::minutes(i64::from(len)),
            note: "Stage 1".to_string(),
        };

        let windows = match_event(&event, &days).unwrap();
        prop_assert!(windows.len() <= 1);
        for w in &windows {
            // Every reported window ends on the slot's nominal end.
            prop_assert!(w.ends_with(&hhmm(e)));
        }
    }

    #[test]
    fn grouping_twice_yields_same_ordered_entries(
        day in arb_date(),
        starts in prop::collection::vec(arb_minute(), 0..8),
    ) {
        let days = vec![DaySchedule {
            date: day,
            name: None,
            stages: vec![vec![
                "00:00-04:00".to_string(),
                "08:00-12:00".to_string(),
                "22:00-00:30".to_string(),
            ]],
        }];
        let events: Vec<OutageEvent> = starts
            .iter()
            .map(|&m| OutageEvent {
                start: at(day, m),
                end: at(day, m) + Duration::minutes(120),
                note: "Stage 1".to_string(),
            })
            .collect();

        let collect = |r: &loadshed_engine::MatchResult| {
            r.iter().map(|(k, w)| (k.clone(), w.to_vec())).collect::<Vec<_>>()
        };
        prop_assert_eq!(collect(&group(&events, &days)), collect(&group(&events, &days)));
    }
}
