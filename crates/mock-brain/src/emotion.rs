//! Emotion model mocks.

use std::time::Duration;

use async_trait::async_trait;
use care_core::{ClassifierError, EmotionModel, EmotionScore};
use tokio::time::sleep;

/// Always predicts the same label and score.
#[derive(Debug, Clone)]
pub struct FixedEmotionModel {
    score: EmotionScore,
}

impl FixedEmotionModel {
    pub fn new(label: &str, score: f32) -> Self {
        Self {
            score: EmotionScore::new(label, score),
        }
    }
}

#[async_trait]
impl EmotionModel for FixedEmotionModel {
    async fn predict(&self, _text: &str) -> Result<EmotionScore, ClassifierError> {
        Ok(self.score.clone())
    }

    fn name(&self) -> &str {
        "FixedEmotionModel"
    }
}

/// Always fails with the same error.
#[derive(Debug, Clone)]
pub struct FailingEmotionModel {
    error: ClassifierError,
}

impl FailingEmotionModel {
    pub fn new(error: ClassifierError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl EmotionModel for FailingEmotionModel {
    async fn predict(&self, _text: &str) -> Result<EmotionScore, ClassifierError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingEmotionModel"
    }
}

/// Wraps another model and sleeps before predicting.
pub struct DelayedEmotionModel<M: EmotionModel> {
    inner: M,
    delay: Duration,
}

impl<M: EmotionModel> DelayedEmotionModel<M> {
    pub fn with_millis(inner: M, millis: u64) -> Self {
        Self {
            inner,
            delay: Duration::from_millis(millis),
        }
    }
}

#[async_trait]
impl<M: EmotionModel> EmotionModel for DelayedEmotionModel<M> {
    async fn predict(&self, text: &str) -> Result<EmotionScore, ClassifierError> {
        sleep(self.delay).await;
        self.inner.predict(text).await
    }

    fn name(&self) -> &str {
        "DelayedEmotionModel"
    }
}
