use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for configuration, source access, export and run-level failures.
///
/// Per-source load conditions are reported as [`crate::loader::LoadProblem`]
/// values instead; only conditions that stop a whole step surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    #[error("no source produced any records ({sources} configured)")]
    EmptyDataset { sources: usize },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("cannot export merged dataset to '{destination}': {reason}")]
    Export { destination: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure to obtain a polarity score for a single record.
///
/// Never aborts a batch: the classifier's caller substitutes `Neutral`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScoringFailure {
    #[error("scorer backend failed: {reason}")]
    Backend { reason: String },
    #[error("scorer returned a non-finite polarity ({value})")]
    NonFinite { value: f64 },
    #[error("scorer exceeded its deadline ({elapsed:?} > {deadline:?})")]
    DeadlineExceeded { elapsed: Duration, deadline: Duration },
}

impl ScoringFailure {
    /// Convenience constructor for backend failures.
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }
}
