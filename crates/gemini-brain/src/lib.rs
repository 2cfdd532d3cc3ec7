//! Gemini generateContent provider.
//!
//! The primary generation backend for the NeuroCare pipeline. It fills the
//! [`ProviderKind::Primary`] slot and forwards the last 6 conversation turns
//! alongside the shared system instruction.
//!
//! ```rust,no_run
//! use gemini_brain::GeminiBrain;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fails with ProviderError::Unconfigured when GEMINI_API_KEY is missing
//!     let brain = GeminiBrain::from_env()?;
//!     println!("Using model {}", brain.config().model);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder};

pub use care_core::{
    async_trait, ClassificationContext, GenerationRequest, Provider, ProviderError, ProviderKind,
};
