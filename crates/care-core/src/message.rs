//! Message types for pipeline input and output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::{ClassificationContext, Intent};

/// Who authored a history turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[serde(alias = "assistant")]
    Bot,
}

/// One earlier turn of the conversation, as supplied by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub sender: Sender,
    pub text: String,
    /// Intent the pipeline reported for this turn, echoed back by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl HistoryTurn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            intent: None,
        }
    }

    /// Create a bot turn.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            intent: None,
        }
    }

    /// Attach the intent reported for this turn.
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }
}

/// One of the two generative backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Gemini.
    #[default]
    #[serde(alias = "gemini")]
    Primary,
    /// OpenAI-compatible chat completions.
    #[serde(alias = "openai")]
    Secondary,
}

impl ProviderKind {
    /// The provider tried after this one.
    pub fn other(&self) -> Self {
        match self {
            ProviderKind::Primary => ProviderKind::Secondary,
            ProviderKind::Secondary => ProviderKind::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Primary => "primary",
            ProviderKind::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "gemini" => Ok(ProviderKind::Primary),
            "secondary" | "openai" => Ok(ProviderKind::Secondary),
            other => Err(format!("unknown provider mode: {}", other)),
        }
    }
}

/// Which generation path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    Primary,
    Secondary,
    Template,
}

impl LlmMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmMode::Primary => "primary",
            LlmMode::Secondary => "secondary",
            LlmMode::Template => "template",
        }
    }
}

impl From<ProviderKind> for LlmMode {
    fn from(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Primary => LlmMode::Primary,
            ProviderKind::Secondary => LlmMode::Secondary,
        }
    }
}

impl fmt::Display for LlmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body accepted at the transport boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Option<Vec<HistoryTurn>>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// `"primary"` / `"secondary"` (or `"gemini"` / `"openai"`).
    #[serde(default)]
    pub mode: Option<String>,
}

impl ChatRequest {
    /// Create a request for the given message with no history.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

/// A validated user message. The text is never empty after trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    text: String,
    history: Vec<HistoryTurn>,
    requested_provider: ProviderKind,
}

impl IncomingMessage {
    /// Create a message, or `None` if the text is empty after trimming.
    pub fn new(
        text: impl Into<String>,
        history: Vec<HistoryTurn>,
        requested_provider: ProviderKind,
    ) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            history,
            requested_provider,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &[HistoryTurn] {
        &self.history
    }

    pub fn requested_provider(&self) -> ProviderKind {
        self.requested_provider
    }

    /// The most recent bot turn, if any.
    pub fn last_bot_turn(&self) -> Option<&HistoryTurn> {
        self.history
            .iter()
            .rev()
            .find(|turn| turn.sender == Sender::Bot)
    }
}

/// A reply and the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub reply_text: String,
    pub source: LlmMode,
}

/// Structured result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emotion_label: String,
    pub emotion_score: f32,
    pub intent: Intent,
    pub is_crisis: bool,
    pub llm_mode: LlmMode,
}

impl ChatResponse {
    /// Assemble the response from the classification and the generation result.
    pub fn assemble(context: &ClassificationContext, result: GenerationResult) -> Self {
        Self {
            reply: result.reply_text,
            emotion_label: context.emotion.label.clone(),
            emotion_score: context.emotion.score,
            intent: context.intent,
            is_crisis: context.is_crisis,
            llm_mode: result.source,
        }
    }
}
