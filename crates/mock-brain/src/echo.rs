//! Echo provider - echoes the user message back.

use async_trait::async_trait;
use care_core::{GenerationRequest, Provider, ProviderError, ProviderKind};

/// A provider that echoes the user message.
///
/// Useful for testing the message flow without any model.
#[derive(Debug, Clone)]
pub struct EchoProvider {
    kind: ProviderKind,
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoProvider {
    /// Create a new EchoProvider for the given slot.
    pub fn new(kind: ProviderKind) -> Self {
        Self { kind, prefix: None }
    }

    /// Create a new EchoProvider with a custom prefix.
    ///
    /// ```rust
    /// use mock_brain::{EchoProvider, ProviderKind};
    ///
    /// let provider = EchoProvider::with_prefix(ProviderKind::Secondary, "Echo: ");
    /// // Will reply with "Echo: <original message>"
    /// ```
    pub fn with_prefix(kind: ProviderKind, prefix: impl Into<String>) -> Self {
        Self {
            kind,
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Provider for EchoProvider {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, request.message),
            None => request.message.to_string(),
        })
    }

    fn name(&self) -> &str {
        "EchoProvider"
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}
