//! Tests for refresh cadence decisions.

use std::time::Duration;

use loadshed_engine::{FetchOutcome, RefreshPolicy, RefreshScheduler};

fn policy() -> RefreshPolicy {
    RefreshPolicy {
        update_interval_secs: 1800,
        retry_delay_secs: 60,
    }
}

#[test]
fn defaults_are_thirty_minutes() {
    let p = RefreshPolicy::default();
    assert_eq!(p.update_interval(), Duration::from_secs(30 * 60));
    assert_eq!(p.retry_delay(), Duration::from_secs(30 * 60));
}

#[test]
fn failures_before_first_load_use_retry_delay() {
    let mut scheduler = RefreshScheduler::new(policy());

    assert!(!scheduler.has_loaded());
    assert_eq!(scheduler.record(FetchOutcome::Failed), Duration::from_secs(60));
    assert_eq!(scheduler.record(FetchOutcome::Failed), Duration::from_secs(60));
    assert!(!scheduler.has_loaded());
}

#[test]
fn successful_load_switches_to_update_interval() {
    let mut scheduler = RefreshScheduler::new(policy());

    assert_eq!(scheduler.record(FetchOutcome::Loaded), Duration::from_secs(1800));
    assert!(scheduler.has_loaded());
}

#[test]
fn failure_after_load_keeps_update_interval() {
    let mut scheduler = RefreshScheduler::new(policy());
    scheduler.record(FetchOutcome::Loaded);

    assert_eq!(scheduler.record(FetchOutcome::Failed), Duration::from_secs(1800));
    assert!(scheduler.has_loaded());
}

#[test]
fn policy_from_json_fills_missing_fields() {
    let p = RefreshPolicy::from_json(r#"{"retry_delay_secs": 5}"#).unwrap();
    assert_eq!(p.retry_delay_secs, 5);
    assert_eq!(p.update_interval_secs, 1800);
}

#[test]
fn policy_from_invalid_json_fails() {
    assert!(RefreshPolicy::from_json("{not json").is_err());
}

#[test]
fn policy_rejects_unknown_fields() {
    assert!(RefreshPolicy::from_json(r#"{"update_interval": 10}"#).is_err());
}
