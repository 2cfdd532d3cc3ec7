//! Providers with a fixed outcome.

use async_trait::async_trait;
use care_core::{GenerationRequest, Provider, ProviderError, ProviderKind};

/// A provider that always returns the same reply.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    kind: ProviderKind,
    reply: String,
}

impl StaticProvider {
    pub fn new(kind: ProviderKind, reply: impl Into<String>) -> Self {
        Self {
            kind,
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl Provider for StaticProvider {
    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "StaticProvider"
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

/// A provider that always fails with the same error.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    kind: ProviderKind,
    error: ProviderError,
}

impl FailingProvider {
    pub fn new(kind: ProviderKind, error: ProviderError) -> Self {
        Self { kind, error }
    }

    /// A provider whose backend is unreachable.
    pub fn unavailable(kind: ProviderKind) -> Self {
        Self::new(kind, ProviderError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl Provider for FailingProvider {
    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingProvider"
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}
