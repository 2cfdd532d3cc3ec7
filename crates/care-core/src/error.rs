//! Error types for classifiers and providers.
//!
//! Neither error ever reaches the caller of the pipeline: classifier errors
//! degrade to defaults and provider errors advance the fallback chain.

use thiserror::Error;

/// Errors a generative provider can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// No credential or client was available at startup.
    #[error("provider unconfigured: {0}")]
    Unconfigured(String),

    /// Network or upstream service error at call time.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish within its time budget.
    #[error("provider timed out")]
    Timeout,

    /// The provider answered, but the reply is unusable (empty or generic).
    #[error("reply rejected: {0}")]
    Rejected(String),
}

/// Errors the emotion model can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    /// No model credential was supplied.
    #[error("classifier unconfigured: {0}")]
    Unconfigured(String),

    /// The model service could not be reached or returned an error status.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish within its time budget.
    #[error("classifier timed out")]
    Timeout,

    /// The model answered with something that is not a label/score list.
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),
}
