//! Orchestrator configuration.

use std::env;
use std::time::Duration;

use care_core::Intent;
use tracing::warn;

/// Tunables of the fallback chain.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Upper bound for a single provider call.
    pub provider_timeout: Duration,

    /// Reject deflecting or very short provider replies.
    pub reject_generic_replies: bool,

    /// Intents answered straight from the template bank.
    pub template_only_intents: Vec<Intent>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(25),
            reject_generic_replies: true,
            template_only_intents: vec![Intent::Goodbye, Intent::Gratitude],
        }
    }
}

impl OrchestratorConfig {
    /// Create configuration from environment variables.
    ///
    /// - `CARE_PROVIDER_TIMEOUT_SECS` (default: 25)
    /// - `CARE_REJECT_GENERIC_REPLIES` (default: true)
    /// - `CARE_TEMPLATE_ONLY_INTENTS` - comma-separated intents (default: goodbye,gratitude;
    ///   an empty value disables the shortcut)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let provider_timeout = env::var("CARE_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.provider_timeout);

        let reject_generic_replies = env::var("CARE_REJECT_GENERIC_REPLIES")
            .map(|v| parse_bool(&v).unwrap_or(defaults.reject_generic_replies))
            .unwrap_or(defaults.reject_generic_replies);

        let template_only_intents = env::var("CARE_TEMPLATE_ONLY_INTENTS")
            .map(|v| parse_intents(&v))
            .unwrap_or(defaults.template_only_intents);

        Self {
            provider_timeout,
            reject_generic_replies,
            template_only_intents,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }

    /// Whether `intent` skips the providers.
    pub fn is_template_only(&self, intent: Intent) -> bool {
        self.template_only_intents.contains(&intent)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_intents(value: &str) -> Vec<Intent> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<Intent>() {
            // Crisis messages always go through the chain
            Ok(Intent::Crisis) => {
                warn!("Ignoring crisis in CARE_TEMPLATE_ONLY_INTENTS");
                None
            }
            Ok(intent) => Some(intent),
            Err(e) => {
                warn!("Ignoring template-only intent: {}", e);
                None
            }
        })
        .collect()
}

/// Builder for OrchestratorConfig.
#[derive(Debug, Default)]
pub struct OrchestratorConfigBuilder {
    config: OrchestratorConfig,
}

impl OrchestratorConfigBuilder {
    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.config.provider_timeout = timeout;
        self
    }

    pub fn reject_generic_replies(mut self, reject: bool) -> Self {
        self.config.reject_generic_replies = reject;
        self
    }

    pub fn template_only_intents(mut self, intents: impl IntoIterator<Item = Intent>) -> Self {
        self.config.template_only_intents = intents
            .into_iter()
            .filter(|intent| *intent != Intent::Crisis)
            .collect();
        self
    }

    pub fn build(self) -> OrchestratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.provider_timeout, Duration::from_secs(25));
        assert!(config.reject_generic_replies);
        assert!(config.is_template_only(Intent::Goodbye));
        assert!(config.is_template_only(Intent::Gratitude));
        assert!(!config.is_template_only(Intent::Stress));
    }

    #[test]
    fn test_parse_intents() {
        assert_eq!(
            parse_intents(" greeting, smalltalk ,bogus,,crisis"),
            vec![Intent::Greeting, Intent::Smalltalk]
        );
        assert!(parse_intents("").is_empty());
    }

    #[test]
    fn test_builder_drops_crisis() {
        let config = OrchestratorConfig::builder()
            .template_only_intents([Intent::Crisis, Intent::Greeting])
            .reject_generic_replies(false)
            .build();
        assert_eq!(config.template_only_intents, vec![Intent::Greeting]);
        assert!(!config.reject_generic_replies);
    }

    // Combined into one test; env vars are process-global.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_care_vars() {
            std::env::remove_var("CARE_PROVIDER_TIMEOUT_SECS");
            std::env::remove_var("CARE_REJECT_GENERIC_REPLIES");
            std::env::remove_var("CARE_TEMPLATE_ONLY_INTENTS");
        }

        clear_all_care_vars();
        let config = OrchestratorConfig::from_env();
        assert_eq!(config.template_only_intents, vec![Intent::Goodbye, Intent::Gratitude]);

        std::env::set_var("CARE_PROVIDER_TIMEOUT_SECS", "5");
        std::env::set_var("CARE_REJECT_GENERIC_REPLIES", "off");
        std::env::set_var("CARE_TEMPLATE_ONLY_INTENTS", "");
        let config = OrchestratorConfig::from_env();
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert!(!config.reject_generic_replies);
        assert!(config.template_only_intents.is_empty());

        std::env::set_var("CARE_REJECT_GENERIC_REPLIES", "maybe");
        assert!(OrchestratorConfig::from_env().reject_generic_replies);

        clear_all_care_vars();
    }
}
