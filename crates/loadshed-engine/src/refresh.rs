//! Refresh cadence for repeated reconciliation passes.
//!
//! Holds the "has loaded at least once" flag and the interval/retry pair
//! explicitly. Nothing here sleeps or fetches; the caller asks for the next
//! delay after each attempt and does the waiting itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

const DEFAULT_SECS: u64 = 30 * 60;

/// Configured delays, in seconds on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshPolicy {
    /// Delay between passes once data has loaded.
    pub update_interval_secs: u64,
    /// Delay before retrying while nothing has loaded yet.
    pub retry_delay_secs: u64,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            update_interval_secs: DEFAULT_SECS,
            retry_delay_secs: DEFAULT_SECS,
        }
    }
}

impl RefreshPolicy {
    /// Parse a policy from JSON; omitted fields fall back to the defaults.
    ///
    /// # Errors
    /// Returns `ReconcileError::Dataset` if the JSON is malformed or carries an
    /// unknown field.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

/// Result of one fetch-and-reconcile attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    policy: RefreshPolicy,
    loaded: bool,
}

impl RefreshScheduler {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            loaded: false,
        }
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn policy(&self) -> &RefreshPolicy {
        &self.policy
    }

    /// Record an attempt and return how long to wait before the next one.
    ///
    /// Failures before the first successful load retry after `retry_delay`.
    /// Once something has loaded, every attempt waits `update_interval` and the
    /// last good display stays up in between.
    pub fn record(&mut self, outcome: FetchOutcome) -> Duration {
        if outcome == FetchOutcome::Loaded {
            self.loaded = true;
        }
        let delay = if self.loaded {
            self.policy.update_interval()
        } else {
            self.policy.retry_delay()
        };
        debug!(?outcome, loaded = self.loaded, ?delay, "scheduled next refresh");
        delay
    }
}
