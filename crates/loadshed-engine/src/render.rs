//! Drive one reconciliation pass over a dataset and produce the display list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::format::format_key;
use crate::grouper::{self, MatchResult};

/// One display row: the humanized event range and its matched windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub windows: Vec<String>,
}

/// Everything the display layer needs for one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayList {
    /// Area label, from `info.name`.
    pub area: String,
    pub periods: Vec<Period>,
    /// Reasons for events left out of `periods`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// Reconcile `dataset`, sorting its events chronologically first.
///
/// Records that fail validation are skipped before grouping and listed first
/// in [`MatchResult::skipped`]. The sort is stable, so events sharing a start
/// keep their dataset order.
pub fn reconcile(dataset: &Dataset) -> MatchResult {
    let mut result = MatchResult::default();
    let mut events = Vec::with_capacity(dataset.events.len());
    for record in &dataset.events {
        match record.parse() {
            Ok(event) => events.push(event),
            Err(e) => result.skip(record.0.to_string(), &e),
        }
    }

    events.sort_by_key(|e| e.start);
    grouper::group_into(&mut result, &events, &dataset.schedule.days);
    result
}

/// Reconcile `dataset` and format every entry for display.
pub fn render(dataset: &Dataset) -> DisplayList {
    let result = reconcile(dataset);

    let periods = result
        .iter()
        .map(|(key, windows)| Period {
            label: format_key(key),
            windows: windows.to_vec(),
        })
        .collect();
    let skipped = result
        .skipped()
        .iter()
        .map(|s| format!("{}: {}", s.label, s.reason))
        .collect();

    DisplayList {
        area: dataset.info.name.clone(),
        periods,
        skipped,
    }
}

/// Parse a JSON dataset and render it.
///
/// # Errors
/// Returns `ReconcileError::Dataset` if the JSON does not have the dataset's
/// top-level shape. Per-event failures, malformed records included, are not
/// errors; they show up in `DisplayList::skipped`.
pub fn render_json(json: &str) -> Result<DisplayList> {
    let dataset = Dataset::from_json(json)?;
    Ok(render(&dataset))
}

impl fmt::Display for DisplayList {
    /// Area name, then a label line and a comma-joined windows line per period.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.area)?;
        for period in &self.periods {
            writeln!(f, "{}", period.label)?;
            writeln!(f, "{}", period.windows.join(","))?;
        }
        Ok(())
    }
}
