//! Response orchestration for the NeuroCare pipeline.
//!
//! This crate provides the [`Orchestrator`] type, which classifies a message,
//! walks the provider fallback chain and always returns a reply.
//!
//! # Architecture
//!
//! ```text
//! ChatRequest (from the api crate)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Classify (joined):                                      │
//! │     • EmotionClassifier → label + score (NEUTRAL on error)  │
//! │     • IntentDetector    → first matching rule               │
//! │     • CrisisDetector    → fixed phrase match                │
//! │         ↓                                                   │
//! │  2. Select path:                                            │
//! │     • template-only intent → TemplateBank                   │
//! │     • otherwise requested provider → other provider         │
//! │       → TemplateBank                                        │
//! │         ↓                                                   │
//! │  3. Enforce crisis resources on flagged replies             │
//! │         ↓                                                   │
//! │  4. Assemble ChatResponse                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{ProviderKind, StaticProvider};
//! use orchestrator::{ChatRequest, Orchestrator, ProviderSlot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), orchestrator::OrchestratorError> {
//!     let orchestrator = Orchestrator::builder()
//!         .primary(ProviderSlot::ready(StaticProvider::new(
//!             ProviderKind::Primary,
//!             "Work stress that keeps building is exhausting. Try listing your tasks and circling only the top two. Which one worries you most?",
//!         )))
//!         .build();
//!
//!     let response = orchestrator
//!         .handle(ChatRequest::new("I've been feeling really stressed about work lately"))
//!         .await?;
//!
//!     println!("[{}] {}", response.llm_mode, response.reply);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod orchestrator;
pub mod quality;
mod slot;
pub mod templates;

pub use config::{OrchestratorConfig, OrchestratorConfigBuilder};
pub use error::OrchestratorError;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, Stage};
pub use slot::ProviderSlot;
pub use templates::TemplateBank;

// Re-export commonly used types from dependencies
pub use care_core::{ChatRequest, ChatResponse, HistoryTurn, Intent, LlmMode, ProviderKind};
