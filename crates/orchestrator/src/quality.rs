//! Generic-reply detection.
//!
//! Model replies that deflect ("tell me more about...") or are too short to
//! contain any practical help are rejected so the chain can move on.

/// Replies shorter than this (in characters) are rejected.
pub const MIN_REPLY_CHARS: usize = 80;

/// Lowercase phrases that mark a deflecting reply.
pub const GENERIC_PHRASES: &[&str] = &[
    "help me understand",
    "tell me more about",
    "what's really on your mind",
    "i'm genuinely interested",
    "i'm here to listen",
    "i'd love to understand better",
    "share a bit more",
    "how it's affecting you",
    "that sounds important",
    "can you tell me more",
    "what's going on",
    "i'm here for you",
    "would you like to talk about",
    "i hear you",
    "that must be",
];

/// The first generic phrase contained in `reply`, if any.
pub fn generic_phrase(reply: &str) -> Option<&'static str> {
    let lowered = reply.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    GENERIC_PHRASES
        .iter()
        .copied()
        .find(|phrase| lowered.contains(phrase))
}

/// Why `reply` would be rejected, or `None` if it passes.
pub fn rejection_reason(reply: &str) -> Option<String> {
    if let Some(phrase) = generic_phrase(reply) {
        return Some(format!("generic phrase \"{}\"", phrase));
    }
    if reply.trim().chars().count() < MIN_REPLY_CHARS {
        return Some("reply too short".to_string());
    }
    None
}

/// Whether `reply` should be rejected as generic.
pub fn is_generic_reply(reply: &str) -> bool {
    rejection_reason(reply).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reply_is_generic() {
        assert!(is_generic_reply("Okay."));
        assert!(is_generic_reply(""));
        assert_eq!(rejection_reason("Okay."), Some("reply too short".to_string()));
    }

    #[test]
    fn test_deflecting_phrase_is_generic() {
        let reply = "That sounds really hard. Can you tell me more about what happened at work \
                     this week so I can understand it a little better?";
        assert!(is_generic_reply(reply));
        assert_eq!(generic_phrase(reply), Some("tell me more about"));
        assert_eq!(
            generic_phrase("I\u{2019}m here for you, always, whatever happens next in your week."),
            Some("i'm here for you")
        );
    }

    #[test]
    fn test_specific_reply_passes() {
        let reply = "Work stress that builds up every week is draining. Try listing your tasks, \
                     circling only the top two, and taking a real lunch break. Which deadline \
                     worries you most?";
        assert!(!is_generic_reply(reply));
    }
}
