//! Delayed provider - wraps another provider with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use care_core::{GenerationRequest, Provider, ProviderError, ProviderKind};
use tokio::time::sleep;

/// A provider that wraps another provider and adds artificial delay.
///
/// Useful for testing timeout handling and simulating model latency.
pub struct DelayedProvider<P: Provider> {
    inner: P,
    delay: Duration,
}

impl<P: Provider> DelayedProvider<P> {
    /// Create a new DelayedProvider wrapping the given provider with the specified delay.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a provider with a delay in milliseconds.
    pub fn with_millis(inner: P, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Create a provider with a delay in seconds.
    pub fn with_secs(inner: P, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }
}

#[async_trait]
impl<P: Provider> Provider for DelayedProvider<P> {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        sleep(self.delay).await;
        self.inner.generate(request).await
    }

    fn name(&self) -> &str {
        "DelayedProvider"
    }

    fn kind(&self) -> ProviderKind {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoProvider;
    use care_core::{ClassificationContext, EmotionScore, IncomingMessage, Intent};
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_provider() {
        let provider = DelayedProvider::with_millis(EchoProvider::new(ProviderKind::Primary), 100);
        let msg = IncomingMessage::new("test", vec![], ProviderKind::Primary).unwrap();
        let ctx = ClassificationContext::new(EmotionScore::neutral(), Intent::Unknown, false);

        let start = Instant::now();
        let reply = provider.generate(&GenerationRequest::new(&msg, &ctx)).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(reply, "test");
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_delegates_kind() {
        let provider = DelayedProvider::with_millis(EchoProvider::new(ProviderKind::Secondary), 0);
        assert_eq!(provider.name(), "DelayedProvider");
        assert_eq!(provider.kind(), ProviderKind::Secondary);
    }
}
