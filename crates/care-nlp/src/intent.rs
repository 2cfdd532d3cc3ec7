//! Rule-based intent detection.
//!
//! Rules are evaluated in declaration order and the first match wins, so the
//! table below is a priority list. Short-reply rules only apply to messages
//! of three words or fewer and come first.

use care_core::Intent;
use regex::Regex;
use tracing::{trace, warn};

use crate::normalize::normalize;

/// Maximum word count for a message to count as a short reply.
const SHORT_REPLY_MAX_WORDS: usize = 3;

/// When a rule is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Only for messages of three words or fewer.
    ShortReply,
    /// For every message.
    Any,
}

/// One entry of the intent priority list.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub scope: RuleScope,
    /// Lowercase phrases, matched on word boundaries.
    pub phrases: &'static [&'static str],
}

const fn rule(intent: Intent, scope: RuleScope, phrases: &'static [&'static str]) -> IntentRule {
    IntentRule {
        intent,
        scope,
        phrases,
    }
}

/// The default priority list.
pub const INTENT_RULES: &[IntentRule] = &[
    // Very short replies
    rule(
        Intent::Affirmation,
        RuleScope::ShortReply,
        &["yes", "yeah", "yep", "sure", "ok", "okay", "ofc", "of course"],
    ),
    rule(Intent::Negation, RuleScope::ShortReply, &["no", "nope", "nah", "never"]),
    rule(
        Intent::Uncertainty,
        RuleScope::ShortReply,
        &["idk", "i dont know", "i don't know", "not sure", "maybe", "kinda"],
    ),
    rule(
        Intent::Gratitude,
        RuleScope::ShortReply,
        &["thanks", "thank you", "thx", "tysm", "ty"],
    ),
    rule(
        Intent::Goodbye,
        RuleScope::ShortReply,
        &["bye", "goodbye", "see you", "good night", "goodnight", "gn"],
    ),
    // Greetings & small talk
    rule(
        Intent::Greeting,
        RuleScope::Any,
        &["hi", "hello", "hey", "good morning", "good afternoon", "good evening"],
    ),
    rule(
        Intent::Smalltalk,
        RuleScope::Any,
        &["how are you", "what's up", "whats up", "how is it going"],
    ),
    // Direct emotional states
    rule(
        Intent::Stress,
        RuleScope::Any,
        &[
            "stressed",
            "stress",
            "stressful",
            "pressure",
            "under pressure",
            "overwhelmed with work",
            "burnout",
            "burned out",
            "burnt out",
        ],
    ),
    rule(
        Intent::Anxiety,
        RuleScope::Any,
        &[
            "anxious",
            "anxiety",
            "panic",
            "panic attack",
            "nervous",
            "scared",
            "terrified",
            "overthinking",
            "worried",
        ],
    ),
    rule(
        Intent::Sadness,
        RuleScope::Any,
        &[
            "sad",
            "depressed",
            "depression",
            "lonely",
            "alone",
            "crying",
            "upset",
            "empty",
            "hurt emotionally",
        ],
    ),
    rule(
        Intent::Tiredness,
        RuleScope::Any,
        &["tired", "exhausted", "no energy", "drained", "fatigued", "worn out"],
    ),
    rule(
        Intent::Loneliness,
        RuleScope::Any,
        &[
            "no friends",
            "ignored",
            "left out",
            "no one cares",
            "no one understands",
            "nobody cares",
        ],
    ),
    // Self-esteem
    rule(
        Intent::SelfEsteem,
        RuleScope::Any,
        &[
            "useless",
            "failure",
            "not good enough",
            "worthless",
            "hate myself",
            "disappointment",
        ],
    ),
    // Work / study / exams
    rule(
        Intent::Exams,
        RuleScope::Any,
        &[
            "exam",
            "exams",
            "test",
            "tests",
            "marks",
            "grades",
            "result",
            "results",
            "semester",
            "internals",
        ],
    ),
    rule(
        Intent::WorkStudy,
        RuleScope::Any,
        &[
            "assignment",
            "project",
            "deadline",
            "deadlines",
            "workload",
            "too much work",
            "studies",
            "study",
            "college",
            "job",
            "office",
            "placement",
            "interview",
        ],
    ),
    // Relationships / family
    rule(
        Intent::Relationship,
        RuleScope::Any,
        &[
            "friend",
            "friends",
            "friendship",
            "relationship",
            "breakup",
            "broke up",
            "ex",
            "partner",
            "girlfriend",
            "boyfriend",
            "family issues",
            "my parents",
            "mom",
            "dad",
            "siblings",
        ],
    ),
    // Motivation / feeling stuck
    rule(
        Intent::Motivation,
        RuleScope::Any,
        &[
            "no motivation",
            "lost motivation",
            "unmotivated",
            "i'm not motivated",
            "i am not motivated",
            "feel stuck",
            "stuck in life",
            "dont know what to do",
            "don't know what to do",
            "direction in life",
        ],
    ),
    // Asking for help or coping ideas
    rule(
        Intent::CopingRequest,
        RuleScope::Any,
        &[
            "what should i do",
            "how do i handle",
            "how to deal with",
            "how do i deal with",
            "any advice",
            "any suggestion",
            "any suggestions",
            "how can i cope",
            "help me",
        ],
    ),
    // Crisis (also flagged independently by the crisis detector)
    rule(
        Intent::Crisis,
        RuleScope::Any,
        &[
            "suicide",
            "suicidal",
            "kill myself",
            "end my life",
            "self-harm",
            "self harm",
            "hurt myself",
            "dont want to live",
            "don't want to live",
            "no reason to live",
        ],
    ),
    // Gratitude / goodbye in longer sentences
    rule(
        Intent::Gratitude,
        RuleScope::Any,
        &[
            "thank you so much",
            "thanks a lot",
            "you really helped",
            "this helped",
            "i appreciate",
        ],
    ),
    rule(
        Intent::Goodbye,
        RuleScope::Any,
        &[
            "i have to go",
            "got to go",
            "need to sleep",
            "going to sleep",
            "talk to you later",
            "see you later",
        ],
    ),
];

#[derive(Debug, Clone)]
struct CompiledRule {
    intent: Intent,
    scope: RuleScope,
    pattern: Regex,
}

impl CompiledRule {
    fn compile(rule: &IntentRule) -> Result<Self, regex::Error> {
        let alternatives = rule
            .phrases
            .iter()
            .map(|phrase| regex::escape(phrase))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternatives))?;
        Ok(Self {
            intent: rule.intent,
            scope: rule.scope,
            pattern,
        })
    }
}

/// Ordered, first-match-wins intent detector.
///
/// Patterns are compiled once at construction; detection is pure and does no
/// I/O, so one detector can be shared across requests.
#[derive(Debug, Clone)]
pub struct IntentDetector {
    rules: Vec<CompiledRule>,
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentDetector {
    /// Create a detector over [`INTENT_RULES`].
    ///
    /// If the table fails to compile, every message resolves to
    /// [`Intent::Unknown`].
    pub fn new() -> Self {
        Self::with_rules(INTENT_RULES).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to compile intent rules, intent detection disabled");
            Self { rules: Vec::new() }
        })
    }

    /// Create a detector over a custom priority list.
    pub fn with_rules(rules: &[IntentRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Number of rules in the priority list.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Detect the intent of `text`. Unmatched or empty text yields [`Intent::Unknown`].
    pub fn detect(&self, text: &str) -> Intent {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Intent::Unknown;
        }

        let is_short = normalized.split_whitespace().count() <= SHORT_REPLY_MAX_WORDS;

        let intent = self
            .rules
            .iter()
            .filter(|rule| rule.scope == RuleScope::Any || is_short)
            .find(|rule| rule.pattern.is_match(&normalized))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Unknown);

        trace!(intent = %intent, short = is_short, "Intent detected");
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_compiles() {
        let detector = IntentDetector::new();
        assert_eq!(detector.rule_count(), INTENT_RULES.len());
    }

    #[test]
    fn test_stress_scenario() {
        let detector = IntentDetector::new();
        assert_eq!(
            detector.detect("I've been feeling really stressed about work lately"),
            Intent::Stress
        );
    }

    #[test]
    fn test_short_replies() {
        let detector = IntentDetector::new();
        assert_eq!(detector.detect("yeah"), Intent::Affirmation);
        assert_eq!(detector.detect("Nope."), Intent::Negation);
        assert_eq!(detector.detect("idk maybe"), Intent::Uncertainty);
        // "sure" is an affirmation phrase and that rule is declared first
        assert_eq!(detector.detect("not sure"), Intent::Affirmation);
        assert_eq!(detector.detect("thanks!"), Intent::Gratitude);
        assert_eq!(detector.detect("ok bye"), Intent::Affirmation);
        assert_eq!(detector.detect("good night"), Intent::Goodbye);
    }

    #[test]
    fn test_short_reply_rules_ignore_long_messages() {
        let detector = IntentDetector::new();
        // "no" would be a negation as a short reply; in a long message the
        // loneliness rule is the first to match.
        assert_eq!(
            detector.detect("no one cares about me at all"),
            Intent::Loneliness
        );
    }

    #[test]
    fn test_word_boundaries() {
        let detector = IntentDetector::new();
        // "hi" inside "this"/"something" is not a greeting
        assert_eq!(detector.detect("this is something else entirely"), Intent::Unknown);
        assert_eq!(detector.detect("hi there, friend"), Intent::Greeting);
        assert_eq!(detector.detect("I miss my ex so much lately"), Intent::Relationship);
    }

    #[test]
    fn test_declaration_order_wins() {
        let detector = IntentDetector::new();
        // Matches both stress and anxiety; stress is declared first.
        assert_eq!(
            detector.detect("I'm anxious and stressed all the time"),
            Intent::Stress
        );
        // Matches both exams and work_study; exams is declared first.
        assert_eq!(
            detector.detect("my study plan for the exam is a mess"),
            Intent::Exams
        );
    }

    #[test]
    fn test_custom_rule_order_is_respected() {
        static ANXIETY_FIRST: &[IntentRule] = &[
            rule(Intent::Anxiety, RuleScope::Any, &["anxious"]),
            rule(Intent::Stress, RuleScope::Any, &["stressed"]),
        ];
        let detector = IntentDetector::with_rules(ANXIETY_FIRST).unwrap();
        assert_eq!(
            detector.detect("I'm stressed and anxious all the time"),
            Intent::Anxiety
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        let detector = IntentDetector::new();
        assert_eq!(detector.detect(""), Intent::Unknown);
        assert_eq!(detector.detect("   "), Intent::Unknown);
        assert_eq!(
            detector.detect("the weather has been strange this week"),
            Intent::Unknown
        );
    }

    #[test]
    fn test_deterministic() {
        let detector = IntentDetector::new();
        let text = "I feel stuck in life and have no motivation";
        let first = detector.detect(text);
        for _ in 0..50 {
            assert_eq!(detector.detect(text), first);
        }
        assert_eq!(first, Intent::Motivation);
    }

    #[test]
    fn test_apostrophe_folding() {
        let detector = IntentDetector::new();
        assert_eq!(
            detector.detect("I don\u{2019}t know what to do with my life anymore"),
            Intent::Motivation
        );
    }
}
