//! Mock providers and emotion models for testing the response pipeline.
//!
//! Provider mocks:
//! - `EchoProvider` - Echoes the user message back
//! - `StaticProvider` - Always returns the same reply
//! - `FailingProvider` - Always fails with a given error
//! - `DelayedProvider` - Wraps another provider with artificial delay
//! - `RecordingProvider` - Wraps another provider and records every call
//!
//! Emotion model mocks live in [`emotion`].
//!
//! For production generation, use the `gemini-brain` and `openai-brain` crates.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{
//!     ClassificationContext, EmotionScore, EchoProvider, GenerationRequest, IncomingMessage,
//!     Intent, Provider, ProviderKind,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::ProviderError> {
//!     let provider = EchoProvider::new(ProviderKind::Primary);
//!
//!     let message = IncomingMessage::new("Hello!", vec![], ProviderKind::Primary).unwrap();
//!     let context = ClassificationContext::new(EmotionScore::neutral(), Intent::Greeting, false);
//!
//!     let reply = provider.generate(&GenerationRequest::new(&message, &context)).await?;
//!     assert_eq!(reply, "Hello!");
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
pub mod emotion;
mod fixed;
mod recording;

pub use care_core::{
    async_trait, ClassificationContext, EmotionModel, EmotionScore, GenerationRequest,
    IncomingMessage, Intent, Provider, ProviderError, ProviderKind,
};

pub use delayed::DelayedProvider;
pub use echo::EchoProvider;
pub use emotion::{DelayedEmotionModel, FailingEmotionModel, FixedEmotionModel};
pub use fixed::{FailingProvider, StaticProvider};
pub use recording::{RecordedCall, RecordingProvider};
