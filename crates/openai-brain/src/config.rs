//! Configuration for OpenAiBrain.

use std::env;
use std::time::Duration;

use care_core::prompt::{load_persona, DEFAULT_PERSONA};
use care_core::ProviderError;

/// Prefix of the placeholder key shipped in example env files.
const PLACEHOLDER_KEY_PREFIX: &str = "sk-REPLACE";

/// Configuration for OpenAiBrain.
#[derive(Debug, Clone)]
pub struct OpenAiBrainConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Persona preamble of the system instruction.
    pub persona: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Number of most recent history turns forwarded to the model.
    pub max_history_turns: usize,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for OpenAiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            persona: DEFAULT_PERSONA.to_string(),
            max_tokens: Some(420),
            temperature: Some(0.9),
            max_history_turns: 8,
            timeout: Duration::from_secs(20),
        }
    }
}

impl OpenAiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key (placeholder `sk-REPLACE...` keys count as missing)
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: 420)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: 0.9)
    /// - `OPENAI_MAX_HISTORY_TURNS` - History turns forwarded (default: 8)
    /// - `OPENAI_TIMEOUT_SECS` - Request timeout (default: 20)
    ///
    /// The persona preamble comes from `CARE_SYSTEM_PROMPT` / `CARE_PROMPT_FILE`.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::Unconfigured("OPENAI_API_KEY not set".to_string()))?;

        if api_key.starts_with(PLACEHOLDER_KEY_PREFIX) {
            return Err(ProviderError::Unconfigured(
                "OPENAI_API_KEY is a placeholder".to_string(),
            ));
        }

        let defaults = Self::default();

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let max_history_turns = env::var("OPENAI_MAX_HISTORY_TURNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_history_turns);

        let timeout = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            api_url: env::var("OPENAI_API_URL").unwrap_or(defaults.api_url),
            api_key,
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            persona: load_persona(),
            max_tokens,
            temperature,
            max_history_turns,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiBrainConfigBuilder {
        OpenAiBrainConfigBuilder::default()
    }
}

/// Builder for OpenAiBrainConfig.
#[derive(Debug, Default)]
pub struct OpenAiBrainConfigBuilder {
    config: OpenAiBrainConfig,
}

impl OpenAiBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the persona preamble.
    pub fn persona(mut self, persona: impl Into<String>) -> Self {
        self.config.persona = persona.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the number of history turns forwarded.
    pub fn max_history_turns(mut self, turns: usize) -> Self {
        self.config.max_history_turns = turns;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiBrainConfig {
        self.config
    }
}
