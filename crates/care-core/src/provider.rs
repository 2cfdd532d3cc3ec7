//! The Provider trait definition.

use async_trait::async_trait;

use crate::context::ClassificationContext;
use crate::error::ProviderError;
use crate::message::{HistoryTurn, IncomingMessage, ProviderKind, Sender};

/// Everything a provider needs to generate one reply.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub message: &'a str,
    pub history: &'a [HistoryTurn],
    pub context: &'a ClassificationContext,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(message: &'a IncomingMessage, context: &'a ClassificationContext) -> Self {
        Self {
            message: message.text(),
            history: message.history(),
            context,
        }
    }

    /// The last `max_messages` history turns as role/content pairs.
    pub fn recent_history(&self, max_messages: usize) -> Vec<HistoryMessage> {
        let skip = self.history.len().saturating_sub(max_messages);
        self.history[skip..]
            .iter()
            .map(HistoryMessage::from)
            .collect()
    }
}

/// A single message in chat-completion form.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryMessage {
    /// Role: "user" or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl HistoryMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

impl From<&HistoryTurn> for HistoryMessage {
    fn from(turn: &HistoryTurn) -> Self {
        match turn.sender {
            Sender::User => HistoryMessage::user(turn.text.clone()),
            Sender::Bot => HistoryMessage::assistant(turn.text.clone()),
        }
    }
}

/// A generative text backend.
///
/// Implementations wrap exactly one external service. They report failures
/// through [`ProviderError`] and never panic; the orchestrator decides what
/// to try next. This trait is object-safe and can be used with `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate a reply for the request.
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;

    /// Which slot this provider fills.
    fn kind(&self) -> ProviderKind;
}
