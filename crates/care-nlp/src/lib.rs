//! Message classifiers for the NeuroCare response pipeline.
//!
//! Three independent classifiers interpret every message:
//!
//! - [`EmotionClassifier`] - dominant emotion via an external model, never fails
//! - [`IntentDetector`] - topical intent from an ordered rule table
//! - [`CrisisDetector`] - self-harm risk from a fixed phrase list
//!
//! Intent and crisis detection are pure and compiled once; only the emotion
//! classifier performs I/O, and it is bounded by a timeout.
//!
//! # Example
//!
//! ```rust
//! use care_nlp::{CrisisDetector, IntentDetector};
//! use care_core::Intent;
//!
//! let intents = IntentDetector::new();
//! assert_eq!(intents.detect("I've been so stressed lately"), Intent::Stress);
//!
//! let crisis = CrisisDetector::new();
//! assert!(crisis.detect("I just can't see the point anymore"));
//! ```

pub mod crisis;
pub mod emotion;
pub mod intent;
mod normalize;

pub use crisis::{CrisisDetector, CRISIS_PHRASES};
pub use emotion::{EmotionClassifier, EmotionConfig, HuggingFaceEmotionModel};
pub use intent::{IntentDetector, IntentRule, RuleScope, INTENT_RULES};
pub use normalize::normalize;
