//! System instruction construction and prompt fingerprinting.
//!
//! The instruction has three parts: a persona preamble (overridable), the
//! response rules, and a crisis section that is appended whenever the request
//! was flagged. Only the preamble can be replaced from configuration.

use std::env;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::context::ClassificationContext;
use crate::crisis_resources::crisis_resources_block;

/// Default persona prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Persona preamble used when nothing is configured.
pub const DEFAULT_PERSONA: &str = "You are NeuroCare, a warm, deeply empathetic mental health support companion. \
Your role is to listen, validate, and gently guide. You are NOT a medical professional, \
but you ARE genuinely compassionate.";

/// Rules every reply must follow, regardless of provider.
pub const RESPONSE_RULES: &str = r#"RESPONSE RULES (MUST FOLLOW):
1. FIRST SENTENCE: Directly acknowledge what the user shared. Reference the specific words or situation they mentioned.
2. VALIDATION: Show you understand the weight of their feelings, matched to the emotion they are showing.
3. REFRAME: Gently point out a strength they may not be noticing, or a small step forward they have already taken.
4. PRACTICAL HELP: Offer 1-3 specific, actionable suggestions that fit THEIR situation and topic. No generic advice.
5. CONTINUE DIALOGUE: End with ONE warm, open-ended follow-up question about their experience.
6. LENGTH: 4-7 sentences. Warm, natural, conversational.
Never use deflecting filler such as "tell me more" or "help me understand" on its own. Every reply is personal to THIS user, THIS moment."#;

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Instruction block appended for flagged messages.
pub fn crisis_instruction() -> String {
    format!(
        "CRISIS PROTOCOL (OVERRIDES THE RULES ABOVE):\n\
         The user may be at risk of self-harm. BEFORE anything else, start your reply with these resources, exactly:\n\
         {resources}\n\
         Then tell them clearly that their life matters, that you are an AI and not a professional, \
         and encourage them to contact one of these resources or a trusted person right now.",
        resources = crisis_resources_block(),
    )
}

/// Build the full system instruction for one request.
pub fn build_system_instruction(persona: &str, context: &ClassificationContext) -> String {
    let mut instruction = String::with_capacity(persona.len() + RESPONSE_RULES.len() + 512);
    instruction.push_str(persona.trim());
    instruction.push_str("\n\n");
    instruction.push_str(RESPONSE_RULES);
    instruction.push_str(&format!(
        "\n\nThe user's detected intent is: {}\nThe user's detected emotion is: {} (confidence {:.2})",
        context.intent,
        context.emotion.label.to_lowercase(),
        context.emotion.score
    ));

    if context.is_crisis {
        instruction.push_str("\n\n");
        instruction.push_str(&crisis_instruction());
    }

    instruction
}

/// Build the final user turn, annotated with the classification.
pub fn build_user_turn(message: &str, context: &ClassificationContext) -> String {
    format!(
        "(Detected emotion: {}; detected intent: {})\nUSER: \"{}\"\n\n\
         Remember: mention the user's exact situation in the first sentence, validate their feelings, \
         give 1-3 relevant, realistic coping steps, and ask one gentle follow-up question.",
        context.emotion.label.to_lowercase(),
        context.intent,
        message.trim()
    )
}

/// Load the persona preamble.
///
/// Priority:
/// 1. `CARE_SYSTEM_PROMPT` env var (if set)
/// 2. Contents of prompt file (`CARE_PROMPT_FILE` or default `SYSTEM_PROMPT.md`)
/// 3. [`DEFAULT_PERSONA`]
pub fn load_persona() -> String {
    if let Ok(prompt) = env::var("CARE_SYSTEM_PROMPT") {
        if !prompt.trim().is_empty() {
            info!("Using persona prompt from CARE_SYSTEM_PROMPT env var");
            return prompt;
        }
    }

    let prompt_file =
        env::var("CARE_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded persona prompt from {}", prompt_file);
        return prompt;
    }

    DEFAULT_PERSONA.to_string()
}

/// Load a prompt file, returning None if not found or empty.
pub fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{EmotionScore, Intent};
    use crate::crisis_resources::{CRISIS_LINE_NUMBER, CRISIS_TEXT_KEYWORD, CRISIS_TEXT_NUMBER};

    fn context(is_crisis: bool) -> ClassificationContext {
        ClassificationContext::new(EmotionScore::new("fear", 0.91), Intent::Anxiety, is_crisis)
    }

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("test prompt");
        let second = hash_prompt("test prompt");
        let different = hash_prompt("another prompt");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_instruction_carries_rules_and_classification() {
        let instruction = build_system_instruction(DEFAULT_PERSONA, &context(false));
        assert!(instruction.starts_with("You are NeuroCare"));
        assert!(instruction.contains("FIRST SENTENCE"));
        assert!(instruction.contains("1-3 specific"));
        assert!(instruction.contains("4-7 sentences"));
        assert!(instruction.contains("intent is: anxiety"));
        assert!(instruction.contains("emotion is: fear"));
        assert!(!instruction.contains("CRISIS PROTOCOL"));
    }

    #[test]
    fn test_crisis_instruction_includes_resource_literals() {
        let instruction = build_system_instruction("Custom persona.", &context(true));
        assert!(instruction.starts_with("Custom persona."));
        assert!(instruction.contains("CRISIS PROTOCOL"));
        assert!(instruction.contains(CRISIS_LINE_NUMBER));
        assert!(instruction.contains(CRISIS_TEXT_KEYWORD));
        assert!(instruction.contains(CRISIS_TEXT_NUMBER));
        assert!(instruction.contains(&crisis_resources_block()));
    }

    #[test]
    fn test_user_turn_quotes_message() {
        let turn = build_user_turn("  I can't sleep before my exam ", &context(false));
        assert!(turn.contains("USER: \"I can't sleep before my exam\""));
        assert!(turn.contains("detected intent: anxiety"));
    }

    #[test]
    fn test_load_prompt_file_missing_or_empty() {
        assert!(load_prompt_file("/definitely/not/here.md").is_none());

        let path = std::env::temp_dir().join("care_core_empty_prompt.md");
        std::fs::write(&path, "   \n").unwrap();
        assert!(load_prompt_file(&path).is_none());

        std::fs::write(&path, "  Be kind.  \n").unwrap();
        assert_eq!(load_prompt_file(&path).as_deref(), Some("Be kind."));
        let _ = std::fs::remove_file(&path);
    }
}
