//! Recording provider - counts calls and keeps the messages it saw.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use care_core::{GenerationRequest, Intent, Provider, ProviderError, ProviderKind};
use tokio::sync::Mutex;

/// What a wrapped provider was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub message: String,
    pub history_len: usize,
    pub intent: Intent,
    pub is_crisis: bool,
}

/// Wraps another provider and records every call before delegating.
pub struct RecordingProvider<P: Provider> {
    inner: P,
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCall>>,
}

impl<P: Provider> RecordingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every recorded call, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.recorded.lock().await.clone()
    }
}

#[async_trait]
impl<P: Provider> Provider for RecordingProvider<P> {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().await.push(RecordedCall {
            message: request.message.to_string(),
            history_len: request.history.len(),
            intent: request.context.intent,
            is_crisis: request.context.is_crisis,
        });
        self.inner.generate(request).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn kind(&self) -> ProviderKind {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoProvider;
    use care_core::{ClassificationContext, EmotionScore, HistoryTurn, IncomingMessage};

    #[tokio::test]
    async fn test_records_concurrent_calls() {
        let provider = RecordingProvider::new(EchoProvider::new(ProviderKind::Primary));
        let msg = IncomingMessage::new(
            "hello",
            vec![HistoryTurn::bot("Hi, how are you?")],
            ProviderKind::Primary,
        )
        .unwrap();
        let ctx = ClassificationContext::new(EmotionScore::neutral(), Intent::Greeting, false);
        let request = GenerationRequest::new(&msg, &ctx);

        let results = futures::future::join_all((0..5).map(|_| provider.generate(&request))).await;
        assert!(results.iter().all(|r| r.as_deref() == Ok("hello")));

        assert_eq!(provider.call_count(), 5);
        let calls = provider.calls().await;
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0].history_len, 1);
        assert_eq!(calls[0].intent, Intent::Greeting);
        assert!(!calls[0].is_crisis);
        assert_eq!(provider.name(), "EchoProvider");
    }
}
