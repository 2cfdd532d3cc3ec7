//! Emotion classification via an external text-classification model.
//!
//! [`EmotionClassifier`] is the pipeline-facing wrapper: it never fails and
//! degrades to [`EmotionScore::neutral`] whenever the model is missing, slow
//! or broken. [`HuggingFaceEmotionModel`] is the default model backend.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use care_core::{async_trait, ClassifierError, EmotionModel, EmotionScore};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Default Hugging Face Inference API URL.
pub const DEFAULT_API_URL: &str = "https://api-inference.huggingface.co";

/// Default emotion model.
pub const DEFAULT_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";

/// Longest input passed to the model, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 512;

/// Configuration for emotion classification.
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    /// Inference API URL.
    pub api_url: String,

    /// API token; `None` disables the remote model.
    pub api_token: Option<String>,

    /// Model identifier.
    pub model: String,

    /// Upper bound on a single classification.
    pub timeout: Duration,

    /// Input is truncated to this many characters.
    pub max_input_chars: usize,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_millis(2000),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl EmotionConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `HF_API_TOKEN` - Inference API token (classification disabled if unset)
    /// - `HF_API_URL` - API URL (default: https://api-inference.huggingface.co)
    /// - `EMOTION_MODEL` - Model id (default: j-hartmann/emotion-english-distilroberta-base)
    /// - `EMOTION_TIMEOUT_MS` - Timeout per classification (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_token = env::var("HF_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let timeout = env::var("EMOTION_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);

        Self {
            api_url: env::var("HF_API_URL").unwrap_or(defaults.api_url),
            api_token,
            model: env::var("EMOTION_MODEL").unwrap_or(defaults.model),
            timeout,
            max_input_chars: defaults.max_input_chars,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> EmotionConfigBuilder {
        EmotionConfigBuilder::default()
    }
}

/// Builder for EmotionConfig.
#[derive(Debug, Default)]
pub struct EmotionConfigBuilder {
    config: EmotionConfig,
}

impl EmotionConfigBuilder {
    /// Set the API token.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = Some(token.into());
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model id.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the classification timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum input length in characters.
    pub fn max_input_chars(mut self, chars: usize) -> Self {
        self.config.max_input_chars = chars;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> EmotionConfig {
        self.config
    }
}

/// One label/score pair from the inference API.
#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// The inference API returns either a flat list or a list per input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn top(self) -> Option<LabelScore> {
        let candidates = match self {
            ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(flat) => flat,
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Parse a raw inference API body into the top emotion.
fn parse_classification(body: &str) -> Result<EmotionScore, ClassifierError> {
    let response: ClassificationResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .top()
        .map(|top| EmotionScore::new(top.label, top.score))
        .ok_or_else(|| ClassifierError::InvalidResponse("empty label list".to_string()))
}

/// Emotion model backed by the Hugging Face Inference API.
pub struct HuggingFaceEmotionModel {
    client: Client,
    config: EmotionConfig,
}

impl HuggingFaceEmotionModel {
    /// Create a model client. Fails with `Unconfigured` when no token is set.
    pub fn new(config: EmotionConfig) -> Result<Self, ClassifierError> {
        if config.api_token.is_none() {
            return Err(ClassifierError::Unconfigured("HF_API_TOKEN not set".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ClassifierError::Unconfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("Emotion model initialized: {}", config.model);

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EmotionConfig {
        &self.config
    }
}

#[async_trait]
impl EmotionModel for HuggingFaceEmotionModel {
    async fn predict(&self, text: &str) -> Result<EmotionScore, ClassifierError> {
        let url = format!(
            "{}/models/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(ref token) = self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout
            } else {
                ClassifierError::Unavailable(format!("Failed to send request: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Unavailable(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ClassifierError::Unavailable(format!(
                "API error ({}): {}",
                status.as_u16(),
                body
            )));
        }

        parse_classification(&body)
    }

    fn name(&self) -> &str {
        "HuggingFaceEmotionModel"
    }
}

/// Never-failing emotion classifier used by the pipeline.
#[derive(Clone)]
pub struct EmotionClassifier {
    model: Option<Arc<dyn EmotionModel>>,
    timeout: Duration,
    max_input_chars: usize,
}

impl EmotionClassifier {
    /// Wrap a model with the given timeout.
    pub fn new(model: Arc<dyn EmotionModel>, timeout: Duration) -> Self {
        Self {
            model: Some(model),
            timeout,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// A classifier without a model; every message is `NEUTRAL`/0.0.
    pub fn disabled() -> Self {
        Self {
            model: None,
            timeout: Duration::ZERO,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Build from configuration, falling back to [`EmotionClassifier::disabled`]
    /// when the model cannot be created.
    pub fn from_config(config: EmotionConfig) -> Self {
        let timeout = config.timeout;
        let max_input_chars = config.max_input_chars;
        match HuggingFaceEmotionModel::new(config) {
            Ok(model) => Self {
                model: Some(Arc::new(model)),
                timeout,
                max_input_chars,
            },
            Err(e) => {
                warn!(error = %e, "Emotion model disabled");
                Self::disabled()
            }
        }
    }

    /// Build from environment variables (see [`EmotionConfig::from_env`]).
    pub fn from_env() -> Self {
        Self::from_config(EmotionConfig::from_env())
    }

    /// Override the input truncation length.
    pub fn with_max_input_chars(mut self, chars: usize) -> Self {
        self.max_input_chars = chars;
        self
    }

    /// Whether a model is attached.
    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Classify `text`. Any failure yields [`EmotionScore::neutral`].
    pub async fn classify(&self, text: &str) -> EmotionScore {
        let Some(model) = self.model.as_ref() else {
            return EmotionScore::neutral();
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return EmotionScore::neutral();
        }

        let input: String = trimmed.chars().take(self.max_input_chars).collect();

        match tokio::time::timeout(self.timeout, model.predict(&input)).await {
            Ok(Ok(score)) => {
                let score = EmotionScore::new(&score.label, score.score);
                debug!(label = %score.label, score = score.score, model = model.name(), "Emotion classified");
                score
            }
            Ok(Err(e)) => {
                warn!(error = %e, model = model.name(), "Emotion classification degraded");
                EmotionScore::neutral()
            }
            Err(_) => {
                warn!(
                    error = %ClassifierError::Timeout,
                    model = model.name(),
                    "Emotion classification degraded"
                );
                EmotionScore::neutral()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_core::NEUTRAL_LABEL;
    use std::sync::Mutex;

    struct FixedModel {
        result: Result<EmotionScore, ClassifierError>,
        delay: Duration,
        seen: Mutex<Vec<String>>,
    }

    impl FixedModel {
        fn new(result: Result<EmotionScore, ClassifierError>) -> Self {
            Self {
                result,
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EmotionModel for FixedModel {
        async fn predict(&self, text: &str) -> Result<EmotionScore, ClassifierError> {
            self.seen.lock().unwrap().push(text.to_string());
            tokio::time::sleep(self.delay).await;
            self.result.clone()
        }

        fn name(&self) -> &str {
            "FixedModel"
        }
    }

    #[test]
    fn test_parse_nested_response_picks_top_label() {
        let body = r#"[[{"label":"joy","score":0.1},{"label":"sadness","score":0.85},{"label":"fear","score":0.05}]]"#;
        let score = parse_classification(body).unwrap();
        assert_eq!(score.label, "SADNESS");
        assert!((score.score - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_flat_response() {
        let body = r#"[{"label":"anger","score":0.6},{"label":"neutral","score":0.4}]"#;
        assert_eq!(parse_classification(body).unwrap().label, "ANGER");
    }

    #[test]
    fn test_parse_invalid_response() {
        assert!(matches!(
            parse_classification(r#"{"error":"Model is currently loading"}"#),
            Err(ClassifierError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_classification("[]"),
            Err(ClassifierError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_model_requires_token() {
        let result = HuggingFaceEmotionModel::new(EmotionConfig::default());
        assert!(matches!(result, Err(ClassifierError::Unconfigured(_))));

        let config = EmotionConfig::builder().api_token("hf_test").build();
        let model = HuggingFaceEmotionModel::new(config).unwrap();
        assert_eq!(model.name(), "HuggingFaceEmotionModel");
        assert_eq!(model.config().model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_disabled_classifier_is_neutral() {
        let classifier = EmotionClassifier::from_config(EmotionConfig::default());
        assert!(!classifier.is_enabled());
        let score = classifier.classify("I feel great").await;
        assert_eq!(score.label, NEUTRAL_LABEL);
        assert_eq!(score.score, 0.0);
    }

    #[tokio::test]
    async fn test_classify_normalizes_model_output() {
        let model = Arc::new(FixedModel::new(Ok(EmotionScore {
            label: "joy".to_string(),
            score: 0.97,
        })));
        let classifier = EmotionClassifier::new(model, Duration::from_secs(1));
        let score = classifier.classify("I passed!").await;
        assert_eq!(score.label, "JOY");
    }

    #[tokio::test]
    async fn test_empty_input_skips_model() {
        let model = Arc::new(FixedModel::new(Ok(EmotionScore::new("joy", 0.9))));
        let classifier = EmotionClassifier::new(model.clone(), Duration::from_secs(1));
        assert_eq!(classifier.classify("   ").await, EmotionScore::neutral());
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_long_input_is_truncated() {
        let model = Arc::new(FixedModel::new(Ok(EmotionScore::new("joy", 0.9))));
        let classifier =
            EmotionClassifier::new(model.clone(), Duration::from_secs(1)).with_max_input_chars(10);
        classifier.classify(&"a".repeat(100)).await;
        assert_eq!(model.seen.lock().unwrap()[0].len(), 10);
    }

    #[tokio::test]
    async fn test_model_error_degrades() {
        let model = Arc::new(FixedModel::new(Err(ClassifierError::Unavailable(
            "503".to_string(),
        ))));
        let classifier = EmotionClassifier::new(model, Duration::from_secs(1));
        assert_eq!(classifier.classify("hello").await, EmotionScore::neutral());
    }

    #[tokio::test]
    async fn test_slow_model_times_out() {
        let mut model = FixedModel::new(Ok(EmotionScore::new("joy", 0.9)));
        model.delay = Duration::from_millis(500);
        let classifier = EmotionClassifier::new(Arc::new(model), Duration::from_millis(20));
        assert_eq!(classifier.classify("hello").await, EmotionScore::neutral());
    }

    #[test]
    fn test_from_env_scenarios() {
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_emotion_vars() {
            std::env::remove_var("HF_API_TOKEN");
            std::env::remove_var("HF_API_URL");
            std::env::remove_var("EMOTION_MODEL");
            std::env::remove_var("EMOTION_TIMEOUT_MS");
        }

        // Scenario 1: nothing set
        clear_all_emotion_vars();
        let config = EmotionConfig::from_env();
        assert!(config.api_token.is_none());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_millis(2000));

        // Scenario 2: blank token counts as missing
        std::env::set_var("HF_API_TOKEN", "   ");
        assert!(EmotionConfig::from_env().api_token.is_none());

        // Scenario 3: everything set
        clear_all_emotion_vars();
        std::env::set_var("HF_API_TOKEN", "hf_abc");
        std::env::set_var("HF_API_URL", "http://localhost:9000");
        std::env::set_var("EMOTION_MODEL", "custom/model");
        std::env::set_var("EMOTION_TIMEOUT_MS", "750");
        let config = EmotionConfig::from_env();
        assert_eq!(config.api_token.as_deref(), Some("hf_abc"));
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.model, "custom/model");
        assert_eq!(config.timeout, Duration::from_millis(750));

        clear_all_emotion_vars();
    }
}
