//! Error types for orchestrator operations.

use thiserror::Error;

/// Errors that can reach the caller of the pipeline.
///
/// Classifier and provider failures are absorbed inside the pipeline; only a
/// request that cannot be processed at all is reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    /// The request is malformed (e.g. the message is empty).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
