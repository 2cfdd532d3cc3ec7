//! OpenAiBrain implementation using the chat-completions API.

use care_core::prompt::{build_system_instruction, build_user_turn};
use care_core::{
    async_trait, hash_prompt, GenerationRequest, Provider, ProviderError, ProviderKind,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::OpenAiBrainConfig;

/// Secondary provider backed by an OpenAI-compatible chat-completions API.
///
/// The brain is stateless: history arrives with every request and nothing
/// is stored between calls.
pub struct OpenAiBrain {
    client: Client,
    config: OpenAiBrainConfig,
    persona_hash: String,
}

impl OpenAiBrain {
    /// Create a new OpenAiBrain with the given configuration.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, ProviderError> {
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
            "OpenAiBrain initialized with model: {}, persona fingerprint: {}",
            config.model, persona_hash
        );

        Ok(Self {
            client,
            config,
            persona_hash,
        })
    }

    /// Create an OpenAiBrain from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        let config = OpenAiBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    /// Get the persona fingerprint.
    pub fn persona_hash(&self) -> &str {
        &self.persona_hash
    }

    /// Build the messages array for a chat completion request.
    fn build_messages(&self, request: &GenerationRequest<'_>) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(build_system_instruction(
            &self.config.persona,
            request.context,
        ))];

        for msg in request.recent_history(self.config.max_history_turns) {
            messages.push(ChatMessage {
                role: msg.role,
                content: msg.content,
            });
        }

        messages.push(ChatMessage::user(build_user_turn(
            request.message,
            request.context,
        )));

        messages
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending chat completion request with {} messages", request.messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Unavailable(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(describe_api_error(
                status.as_u16(),
                &error_text,
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Unavailable(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(completion)
    }
}

/// Render an error body, preferring the structured API error message.
fn describe_api_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(api_error) => match api_error.error.error_type {
            Some(kind) => format!("API error ({}, {}): {}", status, kind, api_error.error.message),
            None => format!("API error ({}): {}", status, api_error.error.message),
        },
        Err(_) => format!("API error ({}): {}", status, body),
    }
}

/// Pull the reply text out of a completion.
fn extract_reply(completion: &ChatCompletionResponse) -> Result<String, ProviderError> {
    completion
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::Rejected("no content in response".to_string()))
}

#[async_trait]
impl Provider for OpenAiBrain {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        let messages = self.build_messages(request);
        let completion = self.chat_completion(messages).await?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        if let Some(reason) = completion.choices.first().and_then(|c| c.finish_reason.as_deref()) {
            debug!(model = %completion.model, finish_reason = reason, "Completion finished");
        }

        extract_reply(&completion)
    }

    fn name(&self) -> &str {
        "OpenAiBrain"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Secondary
    }
}
