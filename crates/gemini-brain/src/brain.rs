//! GeminiBrain implementation using the generateContent API.

use care_core::prompt::{build_system_instruction, build_user_turn};
use care_core::{
    async_trait, hash_prompt, GenerationRequest, Provider, ProviderError, ProviderKind,
};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiBrainConfig;

/// Label used for bot turns in the transcript.
const BOT_LABEL: &str = "NeuroCare";

/// Primary provider backed by Gemini.
///
/// History is flattened into a labelled transcript inside a single user
/// content block, so the request never depends on strict role alternation.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
    persona_hash: String,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::Unconfigured("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::Unconfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        let persona_hash = hash_prompt(&config.persona);
        info!(
            "GeminiBrain initialized with model: {}, persona fingerprint: {}",
            config.model, persona_hash
        );

        Ok(Self {
            client,
            config,
            persona_hash,
        })
    }

    /// Create a GeminiBrain from environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(GeminiBrainConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    pub fn persona_hash(&self) -> &str {
        &self.persona_hash
    }

    fn build_request(&self, request: &GenerationRequest<'_>) -> GenerateContentRequest {
        let mut prompt = String::new();

        let history = request.recent_history(self.config.max_history_turns);
        if !history.is_empty() {
            prompt.push_str("Conversation history:\n");
            for msg in &history {
                let label = if msg.role == "user" { "User" } else { BOT_LABEL };
                prompt.push_str(&format!("{}: {}\n", label, msg.content));
            }
            prompt.push('\n');
        }
        prompt.push_str(&build_user_turn(request.message, request.context));

        GenerateContentRequest {
            system_instruction: Content::text(
                None,
                build_system_instruction(&self.config.persona, request.context),
            ),
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    async fn generate_content(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        debug!("Sending generateContent request to model {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => format!(
                    "API error ({}{}): {}",
                    status.as_u16(),
                    api_error
                        .error
                        .status
                        .map(|s| format!(", {}", s))
                        .unwrap_or_default(),
                    api_error.error.message
                ),
                Err(_) => format!("API error ({}): {}", status.as_u16(), error_text),
            };
            return Err(ProviderError::Unavailable(message));
        }

        response.json().await.map_err(map_transport_error)
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Unavailable(format!("Request failed: {}", e))
    }
}

/// Pull the reply text out of a response.
fn extract_reply(response: &GenerateContentResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(ProviderError::Rejected(format!("prompt blocked: {}", reason)));
    }

    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(Content::joined_text)
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        let reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ProviderError::Rejected(format!("empty reply ({})", reason)));
    }
    Ok(text.to_string())
}

#[async_trait]
impl Provider for GeminiBrain {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        let body = self.build_request(request);
        let response = self.generate_content(&body).await?;

        if let Some(ref usage) = response.usage_metadata {
            debug!(
                "Token usage - prompt: {}, candidates: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        extract_reply(&response).inspect_err(|e| warn!(error = %e, "Gemini returned no usable text"))
    }

    fn name(&self) -> &str {
        "GeminiBrain"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_core::{ClassificationContext, EmotionScore, HistoryTurn, IncomingMessage, Intent};

    fn brain() -> GeminiBrain {
        GeminiBrain::new(GeminiBrainConfig::builder().api_key("g-test").build()).unwrap()
    }

    #[test]
    fn test_empty_key_is_unconfigured() {
        assert!(matches!(
            GeminiBrain::new(GeminiBrainConfig::default()),
            Err(ProviderError::Unconfigured(_))
        ));
    }

    #[test]
    fn test_identity() {
        let brain = brain();
        assert_eq!(brain.name(), "GeminiBrain");
        assert_eq!(brain.kind(), ProviderKind::Primary);
    }

    #[test]
    fn test_request_keeps_last_six_turns() {
        let brain = brain();
        let history: Vec<HistoryTurn> = (0..8)
            .map(|i| {
                if i % 2 == 0 {
                    HistoryTurn::user(format!("user turn {}", i))
                } else {
                    HistoryTurn::bot(format!("bot turn {}", i))
                }
            })
            .collect();
        let message = IncomingMessage::new("I'm so tired", history, ProviderKind::Primary).unwrap();
        let context = ClassificationContext::new(EmotionScore::new("sadness", 0.6), Intent::Tiredness, false);
        let body = brain.build_request(&GenerationRequest::new(&message, &context));

        assert_eq!(body.contents.len(), 1);
        let prompt = body.contents[0].joined_text();
        assert!(!prompt.contains("user turn 0"));
        assert!(!prompt.contains("bot turn 1"));
        assert!(prompt.contains("User: user turn 2"));
        assert!(prompt.contains("NeuroCare: bot turn 7"));
        assert!(prompt.contains("I'm so tired"));
        assert!(body.system_instruction.joined_text().contains("intent is: tiredness"));
        assert_eq!(body.system_instruction.role, None);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let brain = brain();
        let message = IncomingMessage::new("hello", vec![], ProviderKind::Primary).unwrap();
        let context = ClassificationContext::new(EmotionScore::neutral(), Intent::Greeting, false);
        let body = brain.build_request(&GenerationRequest::new(&message, &context));

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 420);
        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_extract_reply() {
        let ok: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there. "}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(&ok).unwrap(), "Hello there.");

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(extract_reply(&blocked), Err(ProviderError::Rejected(_))));

        let empty: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        match extract_reply(&empty) {
            Err(ProviderError::Rejected(reason)) => assert!(reason.contains("SAFETY")),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }
}
