//! Crisis detection by fixed phrase matching.
//!
//! Missing a real crisis is far worse than a false alarm, so matching is
//! plain case-insensitive substring search over normalized text with a broad
//! phrase list. Every phrase is stored in normalized form (lowercase,
//! straight apostrophes). Short death words are matched separately on word
//! boundaries so "die" fires without also firing on "diet" or "studied".

use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::normalize::normalize;

/// High-risk phrases: suicidal ideation, self-harm and hopelessness indicators.
pub const CRISIS_PHRASES: &[&str] = &[
    // Suicide
    "suicide",
    "suicidal",
    "kill myself",
    "killing myself",
    "end my life",
    "ending my life",
    "end it all",
    "take my own life",
    "take my life",
    "unalive",
    // Self-harm
    "self-harm",
    "self harm",
    "selfharm",
    "hurt myself",
    "hurting myself",
    "harm myself",
    "cut myself",
    "cutting myself",
    "overdose",
    // Wanting to die
    "want to die",
    "wanna die",
    "wish i was dead",
    "wish i were dead",
    "better off dead",
    "better off without me",
    "don't want to live",
    "dont want to live",
    "do not want to live",
    "don't want to be here anymore",
    "dont want to be here anymore",
    // Hopelessness
    "no reason to live",
    "nothing to live for",
    "no point in living",
    "no point living",
    "not worth living",
    "can't see the point",
    "cant see the point",
    "cannot see the point",
    "can't go on",
    "cant go on",
    "cannot go on",
];

/// Death words matched as whole words anywhere in the message.
pub const CRISIS_WORDS: &[&str] = &["die", "dying", "dead"];

fn compile_words(words: &[&str]) -> Option<Regex> {
    let alternatives = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!(r"\b(?:{})\b", alternatives)) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!(error = %e, "Failed to compile crisis words, falling back to phrases only");
            None
        }
    }
}

static DEFAULT_DETECTOR: LazyLock<CrisisDetector> = LazyLock::new(CrisisDetector::new);

/// Check `text` against the default phrase list.
pub fn is_crisis(text: &str) -> bool {
    DEFAULT_DETECTOR.detect(text)
}

/// Fixed-phrase crisis detector.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    phrases: Vec<String>,
    words: Option<Regex>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CrisisDetector {
    /// Create a detector over [`CRISIS_PHRASES`] and [`CRISIS_WORDS`].
    pub fn new() -> Self {
        Self {
            phrases: CRISIS_PHRASES.iter().map(|p| p.to_string()).collect(),
            words: compile_words(CRISIS_WORDS),
        }
    }

    /// Create a detector over [`CRISIS_PHRASES`] plus `extra` phrases.
    ///
    /// Extra phrases are normalized; the default list is never reduced.
    pub fn with_phrases<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut detector = Self::new();
        for phrase in extra {
            let phrase = normalize(phrase.as_ref());
            if !phrase.is_empty() && !detector.phrases.contains(&phrase) {
                detector.phrases.push(phrase);
            }
        }
        detector
    }

    /// The phrases this detector matches.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// The first configured phrase or death word found in `text`, if any.
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }
        if let Some(phrase) = self
            .phrases
            .iter()
            .find(|phrase| normalized.contains(phrase.as_str()))
        {
            return Some(phrase.as_str());
        }

        let found = self.words.as_ref()?.find(&normalized)?;
        CRISIS_WORDS
            .iter()
            .copied()
            .find(|word| *word == found.as_str())
    }

    /// Whether `text` contains any configured crisis phrase.
    pub fn detect(&self, text: &str) -> bool {
        match self.matched_phrase(text) {
            Some(phrase) => {
                info!(phrase = %phrase, "Crisis phrase matched");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phrase_is_normalized() {
        for phrase in CRISIS_PHRASES {
            assert_eq!(&normalize(phrase), phrase, "phrase not normalized: {}", phrase);
        }
    }

    #[test]
    fn test_every_phrase_detects_itself_in_context() {
        let detector = CrisisDetector::new();
        for phrase in CRISIS_PHRASES {
            let text = format!("Honestly, {} today.", phrase.to_uppercase());
            assert!(detector.detect(&text), "missed phrase: {}", phrase);
        }
    }

    #[test]
    fn test_hopelessness_scenario() {
        assert!(is_crisis("I just can't see the point anymore"));
        assert!(is_crisis("I just can\u{2019}t see the point anymore"));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let detector = CrisisDetector::new();
        assert!(detector.detect("Sometimes I think about SUICIDE"));
        assert!(detector.detect("i've been self-harming again"));
        assert_eq!(detector.matched_phrase("I want to   kill   myself"), Some("kill myself"));
    }

    #[test]
    fn test_ordinary_messages_are_not_flagged() {
        let detector = CrisisDetector::new();
        assert!(!detector.detect("I've been feeling really stressed about work lately"));
        assert!(!detector.detect("I studied all night for my exam"));
        assert!(!detector.detect("Starting a new diet and the deadline is Friday"));
        assert!(!detector.detect("My phone battery died during the studio session"));
        assert!(!detector.detect("hello"));
        assert!(!detector.detect(""));
    }

    #[test]
    fn test_death_words_on_word_boundaries() {
        let detector = CrisisDetector::new();
        assert!(detector.detect("I'd rather die than go back there"));
        assert!(detector.detect("I wish I could just die"));
        assert!(detector.detect("I feel like dying"));
        assert!(detector.detect("Everyone would be better if I was dead"));
        assert_eq!(detector.matched_phrase("I'd rather DIE, honestly"), Some("die"));
        assert_eq!(detector.matched_phrase("I wish I were dead"), Some("wish i were dead"));
    }

    #[test]
    fn test_with_phrases_extends_defaults() {
        let detector = CrisisDetector::with_phrases(["  Give Up On Everything ", ""]);
        assert!(detector.detect("I want to give up on everything"));
        assert!(detector.detect("suicide"));
        assert_eq!(detector.phrases().len(), CRISIS_PHRASES.len() + 1);
    }
}
