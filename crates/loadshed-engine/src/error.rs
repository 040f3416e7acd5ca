//! Error types for loadshed-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Malformed slot '{slot}': {reason}")]
    MalformedSlot { slot: String, reason: String },

    #[error("No stage number in note: '{0}'")]
    MissingStage(String),

    #[error("Stage {stage} out of range: schedule defines {available} stage(s)")]
    StageOutOfRange { stage: u32, available: usize },

    #[error("Malformed event {record}: {reason}")]
    MalformedEvent { record: String, reason: String },

    #[error("Event ends at {end} before or at its start {start}")]
    InvertedRange { start: String, end: String },

    #[error("Dataset parse error: {0}")]
    Dataset(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
