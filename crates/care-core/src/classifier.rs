//! The EmotionModel trait definition.

use async_trait::async_trait;

use crate::context::EmotionScore;
use crate::error::ClassifierError;

/// An opaque single-label text classifier for emotions.
///
/// Implementations return the top label with its confidence. Input
/// normalization, truncation and timeouts are the caller's concern.
#[async_trait]
pub trait EmotionModel: Send + Sync {
    /// Predict the dominant emotion of `text`.
    async fn predict(&self, text: &str) -> Result<EmotionScore, ClassifierError>;

    /// Get a human-readable name for this model.
    fn name(&self) -> &str;
}
