//! Core types and traits for the NeuroCare response pipeline.
//!
//! This crate provides the shared interface between the classifiers, the
//! generative providers and the orchestrator. It defines:
//!
//! - [`Provider`] - The trait every generative backend implements
//! - [`EmotionModel`] - The trait for the external emotion classifier
//! - [`IncomingMessage`] / [`ChatResponse`] - Pipeline input and output
//! - [`ClassificationContext`] - Merged classifier output for one request
//! - [`ProviderError`] / [`ClassifierError`] - Internal failure taxonomy
//! - [`crisis_resources`] - Crisis-line literals shared by prompts and templates
//!
//! # Example
//!
//! ```rust
//! use care_core::{async_trait, GenerationRequest, Provider, ProviderError, ProviderKind};
//!
//! struct CannedProvider;
//!
//! #[async_trait]
//! impl Provider for CannedProvider {
//!     async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
//!         Ok("That sounds like a lot to carry.".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedProvider"
//!     }
//!
//!     fn kind(&self) -> ProviderKind {
//!         ProviderKind::Primary
//!     }
//! }
//! ```

mod classifier;
mod context;
pub mod crisis_resources;
mod error;
mod message;
pub mod prompt;
mod provider;

pub use classifier::EmotionModel;
pub use context::{ClassificationContext, EmotionScore, Intent, NEUTRAL_LABEL};
pub use error::{ClassifierError, ProviderError};
pub use message::{
    ChatRequest, ChatResponse, GenerationResult, HistoryTurn, IncomingMessage, LlmMode,
    ProviderKind, Sender,
};
pub use prompt::hash_prompt;
pub use provider::{GenerationRequest, HistoryMessage, Provider};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
