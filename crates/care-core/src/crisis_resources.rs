//! Crisis-line literals.
//!
//! Both the provider system instruction and the crisis template are built
//! from these constants, so the numbers can only ever change in one place.

/// Suicide & Crisis Lifeline (US), call or text.
pub const CRISIS_LINE_NUMBER: &str = "988";

/// Keyword for the Crisis Text Line.
pub const CRISIS_TEXT_KEYWORD: &str = "HOME";

/// Number for the Crisis Text Line.
pub const CRISIS_TEXT_NUMBER: &str = "741741";

/// Emergency services (US).
pub const EMERGENCY_NUMBER: &str = "911";

/// Bullet list of resources, placed ahead of any other content in crisis replies.
pub fn crisis_resources_block() -> String {
    format!(
        "If you are in danger or thinking about ending your life, please reach out right now:\n\
         • Call {line} (Suicide & Crisis Lifeline in the US) or text {keyword} to {text_number} (Crisis Text Line)\n\
         • Call emergency services ({emergency} in the US)\n\
         • Tell a trusted friend, family member, or counselor",
        line = CRISIS_LINE_NUMBER,
        keyword = CRISIS_TEXT_KEYWORD,
        text_number = CRISIS_TEXT_NUMBER,
        emergency = EMERGENCY_NUMBER,
    )
}

/// Whether a text carries the crisis line and the full text-line instruction.
pub fn contains_crisis_resources(reply: &str) -> bool {
    reply.contains(CRISIS_LINE_NUMBER)
        && reply.contains(CRISIS_TEXT_KEYWORD)
        && reply.contains(CRISIS_TEXT_NUMBER)
}

/// Whether the resources open the reply: either the canonical block, or a
/// first sentence that carries every crisis line.
pub fn leads_with_crisis_resources(reply: &str) -> bool {
    let reply = reply.trim_start();
    reply.starts_with(&crisis_resources_block()) || contains_crisis_resources(first_sentence(reply))
}

/// Text up to the first line break or sentence terminator.
fn first_sentence(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            c == '\n'
                || (matches!(c, '.' | '!' | '?')
                    && text[i + 1..].starts_with(char::is_whitespace))
        })
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

/// Prepend the resource block unless the reply already opens with it.
pub fn ensure_crisis_resources(reply: &str) -> String {
    let reply = reply.trim();
    if leads_with_crisis_resources(reply) {
        return reply.to_string();
    }

    if reply.is_empty() {
        crisis_resources_block()
    } else {
        format!("{}\n\n{}", crisis_resources_block(), reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_contains_every_literal() {
        let block = crisis_resources_block();
        assert!(block.contains(CRISIS_LINE_NUMBER));
        assert!(block.contains(CRISIS_TEXT_KEYWORD));
        assert!(block.contains(CRISIS_TEXT_NUMBER));
        assert!(block.contains(EMERGENCY_NUMBER));
        assert!(contains_crisis_resources(&block));
    }

    #[test]
    fn test_ensure_prepends_when_missing() {
        let reply = ensure_crisis_resources("I'm really glad you told me.");
        assert!(reply.starts_with("If you are in danger"));
        assert!(reply.ends_with("I'm really glad you told me."));
    }

    #[test]
    fn test_ensure_keeps_reply_that_already_has_resources() {
        let original = format!("{}\n\nYou matter.", crisis_resources_block());
        assert_eq!(ensure_crisis_resources(&original), original);
    }

    #[test]
    fn test_ensure_keeps_reply_opening_with_the_lines() {
        let reply = "Please call 988 or text HOME to 741741 right now. You matter to me.";
        assert!(leads_with_crisis_resources(reply));
        assert_eq!(ensure_crisis_resources(reply), reply);
    }

    #[test]
    fn test_ensure_prepends_when_lines_come_late() {
        let reply = "I'm so sorry you're carrying this. You deserve support tonight. \
                     If you can, call 988 or text HOME to 741741.";
        assert!(contains_crisis_resources(reply));
        assert!(!leads_with_crisis_resources(reply));

        let ensured = ensure_crisis_resources(reply);
        assert!(ensured.starts_with(&crisis_resources_block()));
        assert!(ensured.ends_with("text HOME to 741741."));
    }

    #[test]
    fn test_keyword_is_part_of_the_resources() {
        assert!(!contains_crisis_resources("Call 988 or 741741."));
    }

    #[test]
    fn test_ensure_on_empty_reply() {
        assert_eq!(ensure_crisis_resources("  "), crisis_resources_block());
    }
}
