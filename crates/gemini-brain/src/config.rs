//! Configuration for GeminiBrain.

use std::env;
use std::time::Duration;

use care_core::prompt::{load_persona, DEFAULT_PERSONA};
use care_core::ProviderError;

/// Configuration for GeminiBrain.
#[derive(Debug, Clone)]
pub struct GeminiBrainConfig {
    /// API base URL.
    pub api_url: String,

    /// API key, sent as `x-goog-api-key`.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Persona preamble of the system instruction.
    pub persona: String,

    /// Maximum output tokens.
    pub max_output_tokens: Option<u32>,

    /// Temperature for generation.
    pub temperature: Option<f32>,

    /// Number of most recent history turns forwarded to the model.
    pub max_history_turns: usize,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for GeminiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            persona: DEFAULT_PERSONA.to_string(),
            max_output_tokens: Some(420),
            temperature: Some(0.9),
            max_history_turns: 6,
            timeout: Duration::from_secs(20),
        }
    }
}

impl GeminiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional: `GEMINI_API_URL`, `GEMINI_MODEL`, `GEMINI_MAX_TOKENS`,
    /// `GEMINI_TEMPERATURE`, `GEMINI_MAX_HISTORY_TURNS`, `GEMINI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::Unconfigured("GEMINI_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        Ok(Self {
            api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.api_url),
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            persona: load_persona(),
            max_output_tokens: parse_var("GEMINI_MAX_TOKENS").or(defaults.max_output_tokens),
            temperature: parse_var("GEMINI_TEMPERATURE").or(defaults.temperature),
            max_history_turns: parse_var("GEMINI_MAX_HISTORY_TURNS")
                .unwrap_or(defaults.max_history_turns),
            timeout: parse_var("GEMINI_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiBrainConfigBuilder {
        GeminiBrainConfigBuilder::default()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Builder for GeminiBrainConfig.
#[derive(Debug, Default)]
pub struct GeminiBrainConfigBuilder {
    config: GeminiBrainConfig,
}

impl GeminiBrainConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn persona(mut self, persona: impl Into<String>) -> Self {
        self.config.persona = persona.into();
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    pub fn max_history_turns(mut self, turns: usize) -> Self {
        self.config.max_history_turns = turns;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> GeminiBrainConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiBrainConfig::default();
        assert_eq!(config.api_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_history_turns, 6);
        assert_eq!(config.max_output_tokens, Some(420));
        assert_eq!(config.temperature, Some(0.9));
    }

    #[test]
    fn test_builder() {
        let config = GeminiBrainConfig::builder()
            .api_key("key")
            .model("gemini-1.5-pro")
            .max_history_turns(3)
            .timeout(Duration::from_secs(7))
            .build();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.max_history_turns, 3);
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    // Combined into one test; env vars are process-global.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_gemini_vars() {
            for name in [
                "GEMINI_API_KEY",
                "GEMINI_API_URL",
                "GEMINI_MODEL",
                "GEMINI_MAX_TOKENS",
                "GEMINI_TEMPERATURE",
                "GEMINI_MAX_HISTORY_TURNS",
                "GEMINI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(name);
            }
        }

        clear_all_gemini_vars();
        assert!(matches!(
            GeminiBrainConfig::from_env(),
            Err(ProviderError::Unconfigured(_))
        ));

        std::env::set_var("GEMINI_API_KEY", "   ");
        assert!(GeminiBrainConfig::from_env().is_err());

        std::env::set_var("GEMINI_API_KEY", "g-key");
        std::env::set_var("GEMINI_MAX_HISTORY_TURNS", "not-a-number");
        std::env::set_var("GEMINI_TIMEOUT_SECS", "4");
        let config = GeminiBrainConfig::from_env().unwrap();
        assert_eq!(config.api_key, "g-key");
        assert_eq!(config.max_history_turns, 6);
        assert_eq!(config.timeout, Duration::from_secs(4));

        clear_all_gemini_vars();
    }
}
