//! OpenAI-compatible chat-completions provider.
//!
//! This crate provides the secondary generation backend for the NeuroCare
//! pipeline. It talks to any `/v1/chat/completions` endpoint (OpenAI by
//! default) and fills the [`ProviderKind::Secondary`] slot.
//!
//! # Features
//!
//! - Shared NeuroCare system instruction, including the crisis protocol
//! - Last 8 conversation turns forwarded as chat history
//! - Request timeout so a stalled call never blocks the fallback chain
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_brain::OpenAiBrain;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fails with ProviderError::Unconfigured when OPENAI_API_KEY is missing
//!     let brain = OpenAiBrain::from_env()?;
//!     println!("Using model {}", brain.config().model);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OpenAiBrain;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder};

// Re-export care-core types for convenience
pub use care_core::{
    async_trait, ClassificationContext, GenerationRequest, Provider, ProviderError, ProviderKind,
};
