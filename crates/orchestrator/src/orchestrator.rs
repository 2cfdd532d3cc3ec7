//! Main orchestrator that turns one message into one reply.

use std::fmt;
use std::sync::Arc;

use care_core::crisis_resources::ensure_crisis_resources;
use care_core::{
    ChatRequest, ChatResponse, ClassificationContext, GenerationRequest, GenerationResult,
    IncomingMessage, Intent, LlmMode, Provider, ProviderError, ProviderKind,
};
use care_nlp::{CrisisDetector, EmotionClassifier, IntentDetector};
use gemini_brain::GeminiBrain;
use openai_brain::OpenAiBrain;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::OrchestratorConfig;
use crate::error::OrchestratorError;
use crate::quality::rejection_reason;
use crate::slot::ProviderSlot;
use crate::templates::TemplateBank;

/// Pipeline stage, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classifying,
    SelectingProvider,
    Generating,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Classifying => "classifying",
            Stage::SelectingProvider => "selecting_provider",
            Stage::Generating => "generating",
            Stage::Done => "done",
        })
    }
}

/// Runs the classifiers, walks the provider chain and assembles the response.
///
/// The orchestrator holds no per-request state and can be shared behind an
/// `Arc` by any number of concurrent requests.
pub struct Orchestrator {
    emotion: EmotionClassifier,
    intents: IntentDetector,
    crisis: CrisisDetector,
    templates: TemplateBank,
    primary: ProviderSlot,
    secondary: ProviderSlot,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator builder.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// Create an orchestrator from environment variables.
    ///
    /// Missing credentials leave the matching slot unconfigured; they never
    /// fail construction.
    pub fn from_env() -> Self {
        let orchestrator = Self::builder()
            .emotion(EmotionClassifier::from_env())
            .primary(ProviderSlot::from_init(
                ProviderKind::Primary,
                GeminiBrain::from_env(),
            ))
            .secondary(ProviderSlot::from_init(
                ProviderKind::Secondary,
                OpenAiBrain::from_env(),
            ))
            .config(OrchestratorConfig::from_env())
            .build();

        info!(
            primary = orchestrator.primary.is_ready(),
            secondary = orchestrator.secondary.is_ready(),
            emotion_model = orchestrator.emotion.is_enabled(),
            intent_rules = orchestrator.intents.rule_count(),
            "Orchestrator initialized"
        );
        orchestrator
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// The slot for a provider position.
    pub fn slot(&self, kind: ProviderKind) -> &ProviderSlot {
        match kind {
            ProviderKind::Primary => &self.primary,
            ProviderKind::Secondary => &self.secondary,
        }
    }

    /// Validate a raw request and run it through the pipeline.
    ///
    /// An empty message is the only error. A missing or unknown mode selects
    /// the primary provider.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, OrchestratorError> {
        let requested = parse_mode(request.mode.as_deref());
        if let Some(ref user_id) = request.user_id {
            debug!(user_id = %user_id, "Handling chat request");
        }

        let message = IncomingMessage::new(
            request.message,
            request.history.unwrap_or_default(),
            requested,
        )
        .ok_or_else(|| OrchestratorError::InvalidInput("message must not be empty".to_string()))?;

        Ok(self.respond(message).await)
    }

    /// Produce a reply for a validated message. Never fails.
    pub async fn respond(&self, message: IncomingMessage) -> ChatResponse {
        debug!(stage = %Stage::Classifying, text = %message.text(), "Classifying message");
        let context = self.classify(&message).await;

        let result = self.generate(&message, &context).await;

        info!(
            stage = %Stage::Done,
            intent = %context.intent,
            emotion = %context.emotion.label,
            is_crisis = context.is_crisis,
            llm_mode = %result.source,
            "Reply ready"
        );
        ChatResponse::assemble(&context, result)
    }

    /// Run the three classifiers and merge their output.
    pub async fn classify(&self, message: &IncomingMessage) -> ClassificationContext {
        let text = message.text();
        let (emotion, detected, phrase_match) = tokio::join!(
            self.emotion.classify(text),
            async { self.intents.detect(text) },
            async { self.crisis.detect(text) },
        );

        let is_crisis = phrase_match || detected == Intent::Crisis;
        let intent = carry_over_intent(detected, message);

        ClassificationContext::new(emotion, intent, is_crisis)
    }

    async fn generate(
        &self,
        message: &IncomingMessage,
        context: &ClassificationContext,
    ) -> GenerationResult {
        debug!(stage = %Stage::SelectingProvider, "Selecting generation path");

        if !context.is_crisis && self.config.is_template_only(context.intent) {
            debug!(intent = %context.intent, "Template-only intent");
            return self.from_template(message, context);
        }

        let requested = message.requested_provider();
        let request = GenerationRequest::new(message, context);

        for kind in [requested, requested.other()] {
            let provider = match self.slot(kind) {
                ProviderSlot::Ready(provider) => provider,
                ProviderSlot::Unconfigured(reason) => {
                    debug!(slot = %kind, reason = %reason, "Skipping unconfigured provider");
                    continue;
                }
            };

            debug!(stage = %Stage::Generating, slot = %kind, provider = provider.name(), "Calling provider");
            match self.call_provider(provider, &request).await {
                Ok(reply) => {
                    let reply_text = if context.is_crisis {
                        ensure_crisis_resources(&reply)
                    } else {
                        reply
                    };
                    return GenerationResult {
                        reply_text,
                        source: LlmMode::from(kind),
                    };
                }
                Err(e) => {
                    warn!(slot = %kind, provider = provider.name(), error = %e, "Provider failed, falling back");
                }
            }
        }

        self.from_template(message, context)
    }

    /// One bounded provider call, with reply validation.
    async fn call_provider(
        &self,
        provider: &Arc<dyn Provider>,
        request: &GenerationRequest<'_>,
    ) -> Result<String, ProviderError> {
        let reply = timeout(self.config.provider_timeout, provider.generate(request))
            .await
            .map_err(|_| ProviderError::Timeout)??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ProviderError::Rejected("empty reply".to_string()));
        }
        if self.config.reject_generic_replies {
            if let Some(reason) = rejection_reason(reply) {
                return Err(ProviderError::Rejected(reason));
            }
        }
        Ok(reply.to_string())
    }

    fn from_template(
        &self,
        message: &IncomingMessage,
        context: &ClassificationContext,
    ) -> GenerationResult {
        let previous = message.last_bot_turn().map(|turn| turn.text.as_str());
        GenerationResult {
            reply_text: self
                .templates
                .render_avoiding(context.intent, context.is_crisis, previous),
            source: LlmMode::Template,
        }
    }
}

/// Parse the requested mode, falling back to the primary provider.
fn parse_mode(mode: Option<&str>) -> ProviderKind {
    match mode.map(str::trim).filter(|m| !m.is_empty()) {
        None => ProviderKind::Primary,
        Some(mode) => mode.parse().unwrap_or_else(|e| {
            warn!("{}, using primary", e);
            ProviderKind::Primary
        }),
    }
}

/// Reuse the intent of the last bot turn when nothing matched.
///
/// A carried-over `crisis` annotation is ignored: the crisis flag only ever
/// comes from the current message.
fn carry_over_intent(detected: Intent, message: &IncomingMessage) -> Intent {
    if detected != Intent::Unknown {
        return detected;
    }
    match message.last_bot_turn().and_then(|turn| turn.intent) {
        Some(Intent::Crisis) | None => detected,
        Some(previous) => {
            debug!(intent = %previous, "Carrying over intent from last bot turn");
            previous
        }
    }
}

/// Builder for [`Orchestrator`].
///
/// Unset parts default to a disabled emotion model, the built-in rule
/// tables and two unconfigured provider slots.
pub struct OrchestratorBuilder {
    emotion: EmotionClassifier,
    intents: IntentDetector,
    crisis: CrisisDetector,
    templates: TemplateBank,
    primary: ProviderSlot,
    secondary: ProviderSlot,
    config: OrchestratorConfig,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self {
            emotion: EmotionClassifier::disabled(),
            intents: IntentDetector::new(),
            crisis: CrisisDetector::new(),
            templates: TemplateBank::new(),
            primary: ProviderSlot::unconfigured("not provided"),
            secondary: ProviderSlot::unconfigured("not provided"),
            config: OrchestratorConfig::default(),
        }
    }
}

impl OrchestratorBuilder {
    pub fn emotion(mut self, emotion: EmotionClassifier) -> Self {
        self.emotion = emotion;
        self
    }

    pub fn intents(mut self, intents: IntentDetector) -> Self {
        self.intents = intents;
        self
    }

    pub fn crisis(mut self, crisis: CrisisDetector) -> Self {
        self.crisis = crisis;
        self
    }

    pub fn primary(mut self, slot: ProviderSlot) -> Self {
        self.primary = slot;
        self
    }

    pub fn secondary(mut self, slot: ProviderSlot) -> Self {
        self.secondary = slot;
        self
    }

    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Orchestrator {
        Orchestrator {
            emotion: self.emotion,
            intents: self.intents,
            crisis: self.crisis,
            templates: self.templates,
            primary: self.primary,
            secondary: self.secondary,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_core::HistoryTurn;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(None), ProviderKind::Primary);
        assert_eq!(parse_mode(Some("")), ProviderKind::Primary);
        assert_eq!(parse_mode(Some("openai")), ProviderKind::Secondary);
        assert_eq!(parse_mode(Some(" Secondary ")), ProviderKind::Secondary);
        assert_eq!(parse_mode(Some("gemini")), ProviderKind::Primary);
        assert_eq!(parse_mode(Some("claude")), ProviderKind::Primary);
    }

    #[test]
    fn test_carry_over_intent() {
        let history = vec![
            HistoryTurn::user("exams next week"),
            HistoryTurn::bot("Exams can be a lot.").with_intent(Intent::Exams),
        ];
        let message = IncomingMessage::new("hmm", history, ProviderKind::Primary).unwrap();
        assert_eq!(carry_over_intent(Intent::Unknown, &message), Intent::Exams);
        assert_eq!(carry_over_intent(Intent::Stress, &message), Intent::Stress);

        let crisis_history = vec![HistoryTurn::bot("Please call 988.").with_intent(Intent::Crisis)];
        let message = IncomingMessage::new("hmm", crisis_history, ProviderKind::Primary).unwrap();
        assert_eq!(carry_over_intent(Intent::Unknown, &message), Intent::Unknown);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::SelectingProvider.to_string(), "selecting_provider");
    }
}
