//! Hand-authored replies used when no provider can answer.
//!
//! Every non-crisis intent has at least two variants. The crisis reply is
//! built from the shared crisis-resource literals and is the only template
//! returned for flagged messages.

use std::sync::LazyLock;

use care_core::crisis_resources::crisis_resources_block;
use care_core::Intent;
use rand::seq::SliceRandom;
use tracing::trace;

const GREETING: &[&str] = &[
    "Hi, I'm NeuroCare. I'm really glad you reached out today. How are you feeling right now, honestly?",
    "Hello! It's good to hear from you. This is a space just for you, so there's no wrong way to start. What's been on your mind lately?",
    "Hey there, thanks for stopping by. Whatever today has looked like so far, I'm happy to sit with it with you. How has your day been treating you?",
];

const SMALLTALK: &[&str] = &[
    "That's kind of you to ask! I'm here and ready to focus on you. How are you really doing today, beyond the usual \"fine\"?",
    "I'm doing well, thank you for checking in. I'd love to hear about your side of things. What has your week been like so far?",
];

const STRESS: &[&str] = &[
    "It sounds like a lot is landing on your shoulders right now, and that kind of pressure is exhausting. One thing that helps: write down everything on your plate, then circle only the top two. What feels like the biggest source of stress at the moment?",
    "Stress can pile up fast when everything feels urgent at once. Try giving yourself five slow breaths before picking just ONE small task to finish first. Progress beats perfection. Which part of this is weighing on you most?",
    "Carrying this much pressure takes real effort, and noticing it is already a step. For today, protect one short break away from screens, even ten minutes, and let the less urgent things wait. What would make the biggest difference if it got handled first?",
];

const ANXIETY: &[&str] = &[
    "Anxiety can make everything feel urgent and heavy at once. Let's ground you for a moment: name five things you can see, four you can touch and three you can hear. What tends to set the anxious feeling off for you?",
    "When anxiety spikes, your body goes into overdrive. Try breathing in for four counts, holding for four and breathing out for six, three times in a row. What worry feels loudest right now?",
    "Anxious thoughts can spiral quickly, and you're not alone in that. Writing the worry down on paper often takes some of its power away. When did you first notice it building today?",
];

const SADNESS: &[&str] = &[
    "I'm really sorry you're feeling this low. Sadness is valid, and it's okay not to be okay right now. One gentle step could be sending a short message to someone you trust. What has been weighing on your heart?",
    "Feeling down can make everything look greyer. Try one tiny comfort today: a warm drink, a favourite song or five minutes in the sunlight. When did this feeling start for you?",
    "Sadness can feel heavy and isolating, and you don't have to carry it alone here. Jotting down three small things that went okay today can help your mind find some balance. Would you like to share what's been making you sad?",
];

const TIREDNESS: &[&str] = &[
    "Feeling this drained is your body asking for care. Right now: drink a glass of water, take ten slow breaths and, if you can, rest for twenty minutes with an alarm set. What's been using up most of your energy lately?",
    "Exhaustion makes everything harder than it needs to be. A couple of quick resets: step outside for two minutes of fresh air and eat something with a bit of protein. How has your sleep been recently?",
];

const LONELINESS: &[&str] = &[
    "Feeling left out or unseen really hurts, and I'm glad you said it out loud. Reaching out to even one person with a simple \"thinking of you\" can crack the isolation a little. Who is someone you've felt comfortable with before?",
    "Loneliness can whisper that nobody cares, but the fact that you're reaching out shows real strength. Small shared spaces, like a class, a club or an online group about something you enjoy, can be an easier first step. What kind of connection do you miss most?",
];

const SELF_ESTEEM: &[&str] = &[
    "It sounds like you're being really hard on yourself right now. Those thoughts feel true, but they aren't the whole story. Try writing down one thing you handled today, however small. What made you start feeling this way about yourself?",
    "Calling yourself a failure is a heavy thing to carry. Would you talk to a friend the way you're talking to yourself? Try answering that inner critic the way you'd comfort them. Where do you think these thoughts come from?",
];

const WORK_STUDY: &[&str] = &[
    "Deadlines and workload can feel endless when they all stack up together. Try listing every task, then split the biggest one into three small steps you could start today. Which task feels most overwhelming right now?",
    "Juggling work or study with everything else is genuinely demanding. Time-boxing can help: twenty-five minutes of focus, five minutes of rest, repeated a few times. What does your next day or two look like?",
];

const RELATIONSHIP: &[&str] = &[
    "Relationships can bring up so many feelings at once, and it makes sense this is on your mind. Sometimes writing out what you wish you could say helps you see what you really need. What happened that's been bothering you?",
    "Tension with people we care about can be really painful. It's okay to give yourself a little space before deciding what to do next. How are you feeling about them right now?",
];

const EXAMS: &[&str] = &[
    "Exam pressure is real and it can be exhausting. Try breaking your revision into twenty-five minute blocks with five minute breaks, and pick just ONE topic to master tonight. Which subject is weighing on you the most?",
    "Exams can make everything feel high-stakes. Write down the three most important topics, start with the easiest to build momentum, and protect at least six hours of sleep so your memory can consolidate. Which exam is coming up first?",
    "Exam stress hits hard, so let's make it manageable: a checklist of just three things to review tonight, and a ten-minute walk to reset your focus. Done is better than perfect. What's the exam on?",
];

const MOTIVATION: &[&str] = &[
    "Feeling stuck or unmotivated is more common than it looks, and it doesn't mean something is wrong with you. Try choosing one tiny action you could finish in five minutes; momentum often follows. What used to give you energy that feels far away now?",
    "Motivation comes and goes, and it's okay not to feel it right now. Sometimes clarity comes from action rather than the other way round, so pick one small step for today. What would you want to feel more excited about?",
];

const COPING_REQUEST: &[&str] = &[
    "Asking for ways to cope is a strong step. A few things many people find helpful: slow breathing for two minutes, a short walk and writing down what's on your mind. Which of these feels doable for you today?",
    "It's great that you're looking for something practical. Try grounding yourself first with five slow breaths, then break the problem into the smallest next step you can take. What situation would you most like help handling?",
];

const GRATITUDE: &[&str] = &[
    "You're so welcome. I'm really glad this helped, and remember that reaching out for support is a strength, not a weakness. Come back any time you need to talk.",
    "Thank you for saying that, it means a lot. Taking care of yourself matters, and you've been doing that by talking things through. I'm here whenever you need me.",
];

const GOODBYE: &[&str] = &[
    "I'm really glad we talked today. Be gentle with yourself, and remember you can come back any time you need to. Take care!",
    "Thank you for opening up today. You're doing better than you think. Rest well, and I'll be here whenever you want to talk again.",
];

const AFFIRMATION: &[&str] = &[
    "Okay, thank you for letting me know. Let's take it one step at a time. What feels most important to talk about next?",
    "Got it, thank you. I'm glad we're on the same page about this. Where would you like to go from here?",
];

const NEGATION: &[&str] = &[
    "That's completely okay, there's no pressure at all. We can go at whatever pace feels right for you. Is there something else on your mind?",
    "Alright, thanks for being honest with me. We don't have to go there. What would feel more helpful to talk about instead?",
];

const UNCERTAINTY: &[&str] = &[
    "It's okay not to be sure. Feelings can be hard to put into words. If you had to pick one word for how today has felt, what would it be?",
    "Not knowing is a perfectly fine place to start. Sometimes it helps to notice what your body is feeling first. Where do you feel it most right now?",
];

const UNKNOWN: &[&str] = &[
    "Thank you for sharing that with me. I want to make sure I really understand where you are right now. How has this been affecting your day?",
    "I'm listening. Whatever you're going through matters, even if it's hard to put into words. What part of this feels biggest for you at the moment?",
    "I appreciate you telling me this. Let's take it slowly together. How are you feeling about it right now?",
];

static CRISIS: LazyLock<String> = LazyLock::new(|| {
    format!(
        "I'm genuinely concerned about your safety right now. I'm an AI and not a professional, \
         but your life is incredibly important.\n{}\n\
         You don't have to go through this alone. Please reach out for help right now. You deserve support.",
        crisis_resources_block()
    )
});

/// Template source for the last step of the fallback chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateBank;

impl TemplateBank {
    pub fn new() -> Self {
        Self
    }

    /// The fixed variant set for a non-crisis intent.
    ///
    /// Intents without a dedicated set share the `unknown` set.
    pub fn variants(&self, intent: Intent) -> &'static [&'static str] {
        match intent {
            Intent::Greeting => GREETING,
            Intent::Smalltalk => SMALLTALK,
            Intent::Stress => STRESS,
            Intent::Anxiety => ANXIETY,
            Intent::Sadness => SADNESS,
            Intent::Tiredness => TIREDNESS,
            Intent::Loneliness => LONELINESS,
            Intent::SelfEsteem => SELF_ESTEEM,
            Intent::WorkStudy => WORK_STUDY,
            Intent::Relationship => RELATIONSHIP,
            Intent::Exams => EXAMS,
            Intent::Motivation => MOTIVATION,
            Intent::CopingRequest => COPING_REQUEST,
            Intent::Gratitude => GRATITUDE,
            Intent::Goodbye => GOODBYE,
            Intent::Affirmation => AFFIRMATION,
            Intent::Negation => NEGATION,
            Intent::Uncertainty => UNCERTAINTY,
            Intent::Crisis | Intent::Unknown => UNKNOWN,
        }
    }

    /// The crisis reply, carrying every crisis-resource literal.
    pub fn crisis(&self) -> &'static str {
        CRISIS.as_str()
    }

    /// Pick a reply for `intent`.
    pub fn render(&self, intent: Intent, is_crisis: bool) -> String {
        self.render_avoiding(intent, is_crisis, None)
    }

    /// Pick a reply for `intent`, never repeating `previous_bot_text` when
    /// another variant exists. The crisis intent always yields the crisis reply.
    pub fn render_avoiding(
        &self,
        intent: Intent,
        is_crisis: bool,
        previous_bot_text: Option<&str>,
    ) -> String {
        if is_crisis || intent == Intent::Crisis {
            return self.crisis().to_string();
        }

        let variants = self.variants(intent);
        let previous = previous_bot_text.map(str::trim);
        let candidates: Vec<&'static str> = variants
            .iter()
            .copied()
            .filter(|variant| Some(*variant) != previous)
            .collect();
        let pool = if candidates.is_empty() {
            variants.to_vec()
        } else {
            candidates
        };

        let reply = pool
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(UNKNOWN[0]);
        trace!(intent = %intent, pool = pool.len(), "Template selected");
        reply.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_core::crisis_resources::{contains_crisis_resources, CRISIS_LINE_NUMBER};

    #[test]
    fn test_every_intent_has_two_variants() {
        let bank = TemplateBank::new();
        for intent in Intent::ALL.iter() {
            assert!(
                bank.variants(*intent).len() >= 2,
                "intent {} has fewer than two variants",
                intent
            );
        }
    }

    #[test]
    fn test_render_is_member_of_variant_set() {
        let bank = TemplateBank::new();
        for intent in Intent::ALL.iter().filter(|i| **i != Intent::Crisis) {
            for _ in 0..20 {
                let reply = bank.render(*intent, false);
                assert!(bank.variants(*intent).contains(&reply.as_str()));
            }
        }
    }

    #[test]
    fn test_render_avoids_previous_variant() {
        let bank = TemplateBank::new();
        let previous = GOODBYE[0];
        for _ in 0..50 {
            assert_eq!(
                bank.render_avoiding(Intent::Goodbye, false, Some(previous)),
                GOODBYE[1]
            );
        }
    }

    #[test]
    fn test_previous_outside_set_is_ignored() {
        let bank = TemplateBank::new();
        let reply = bank.render_avoiding(Intent::Stress, false, Some("something else"));
        assert!(STRESS.contains(&reply.as_str()));
    }

    #[test]
    fn test_crisis_overrides_intent() {
        let bank = TemplateBank::new();
        let reply = bank.render(Intent::Greeting, true);
        assert_eq!(reply, bank.crisis());
        assert!(reply.contains(CRISIS_LINE_NUMBER));
        assert!(contains_crisis_resources(&reply));
        assert_eq!(bank.render(Intent::Crisis, false), bank.crisis());
    }

    #[test]
    fn test_templates_pass_quality_gate() {
        let bank = TemplateBank::new();
        for intent in Intent::ALL.iter() {
            for variant in bank.variants(*intent) {
                assert!(
                    !crate::quality::is_generic_reply(variant),
                    "template would be rejected as generic: {}",
                    variant
                );
            }
        }
    }
}
