//! Classification context shared between the detectors and the providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label reported when the emotion model is unavailable or the input is empty.
pub const NEUTRAL_LABEL: &str = "NEUTRAL";

/// Topical intent of a user message.
///
/// The set is closed: anything the detector cannot place is [`Intent::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Smalltalk,
    Stress,
    Anxiety,
    Sadness,
    Tiredness,
    Loneliness,
    SelfEsteem,
    WorkStudy,
    Relationship,
    Exams,
    Motivation,
    Gratitude,
    Goodbye,
    Affirmation,
    Negation,
    Uncertainty,
    CopingRequest,
    Crisis,
    #[default]
    Unknown,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 20] = [
        Intent::Greeting,
        Intent::Smalltalk,
        Intent::Stress,
        Intent::Anxiety,
        Intent::Sadness,
        Intent::Tiredness,
        Intent::Loneliness,
        Intent::SelfEsteem,
        Intent::WorkStudy,
        Intent::Relationship,
        Intent::Exams,
        Intent::Motivation,
        Intent::Gratitude,
        Intent::Goodbye,
        Intent::Affirmation,
        Intent::Negation,
        Intent::Uncertainty,
        Intent::CopingRequest,
        Intent::Crisis,
        Intent::Unknown,
    ];

    /// Wire name of the intent (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Smalltalk => "smalltalk",
            Intent::Stress => "stress",
            Intent::Anxiety => "anxiety",
            Intent::Sadness => "sadness",
            Intent::Tiredness => "tiredness",
            Intent::Loneliness => "loneliness",
            Intent::SelfEsteem => "self_esteem",
            Intent::WorkStudy => "work_study",
            Intent::Relationship => "relationship",
            Intent::Exams => "exams",
            Intent::Motivation => "motivation",
            Intent::Gratitude => "gratitude",
            Intent::Goodbye => "goodbye",
            Intent::Affirmation => "affirmation",
            Intent::Negation => "negation",
            Intent::Uncertainty => "uncertainty",
            Intent::CopingRequest => "coping_request",
            Intent::Crisis => "crisis",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == wanted)
            .ok_or_else(|| format!("unknown intent: {}", s))
    }
}

/// Emotion label and confidence from the emotion model.
///
/// The label vocabulary belongs to the model and is kept open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    /// Upper-cased label, e.g. `JOY` or `SADNESS`.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

impl EmotionScore {
    /// Create a score, upper-casing the label and clamping the score into `[0, 1]`.
    pub fn new(label: impl AsRef<str>, score: f32) -> Self {
        let label = label.as_ref().trim();
        let label = if label.is_empty() {
            NEUTRAL_LABEL.to_string()
        } else {
            label.to_uppercase()
        };
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { label, score }
    }

    /// The lowest-confidence default used whenever classification degrades.
    pub fn neutral() -> Self {
        Self {
            label: NEUTRAL_LABEL.to_string(),
            score: 0.0,
        }
    }
}

impl Default for EmotionScore {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Merged output of the three classifiers for a single request.
///
/// Built once after classification and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationContext {
    pub emotion: EmotionScore,
    pub intent: Intent,
    pub is_crisis: bool,
}

impl ClassificationContext {
    pub fn new(emotion: EmotionScore, intent: Intent, is_crisis: bool) -> Self {
        Self {
            emotion,
            intent,
            is_crisis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_round_trips_through_wire_name() {
        for intent in Intent::ALL {
            assert_eq!(intent.as_str().parse::<Intent>().unwrap(), intent);
        }
        assert!("nonsense".parse::<Intent>().is_err());
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::SelfEsteem).unwrap();
        assert_eq!(json, "\"self_esteem\"");
        let parsed: Intent = serde_json::from_str("\"coping_request\"").unwrap();
        assert_eq!(parsed, Intent::CopingRequest);
    }

    #[test]
    fn test_emotion_score_normalizes() {
        let score = EmotionScore::new("joy", 1.7);
        assert_eq!(score.label, "JOY");
        assert_eq!(score.score, 1.0);

        let score = EmotionScore::new("  ", -0.2);
        assert_eq!(score.label, NEUTRAL_LABEL);
        assert_eq!(score.score, 0.0);

        assert_eq!(EmotionScore::new("fear", f32::NAN).score, 0.0);
    }
}
