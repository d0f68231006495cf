//! Prompting rules for the support companion.

use serde::Serialize;

/// Number of stored messages replayed to the model as context.
pub const CONTEXT_WINDOW: usize = 20;

pub const COMPANION_SYSTEM_PROMPT: &str = "You are Mindspace, a warm and supportive mental-wellbeing \
companion. Listen carefully, reflect feelings back, and offer gentle, practical coping ideas \
such as breathing exercises, journaling or reaching out to trusted people. You are not a \
therapist: never diagnose or prescribe, and encourage professional help when problems persist. \
Keep replies concise (under 150 words).";

pub const SAFETY_ADDENDUM: &str = "The user may be at risk of self-harm. Respond with empathy, \
take them seriously, encourage them to contact a crisis line or emergency services right now, \
and remind them they are not alone.";

/// Sent when the AI provider cannot be reached.
pub const FALLBACK_REPLY: &str = "I'm having trouble responding right now, but I'm still here \
for you. Try taking a few slow, deep breaths. If you need to talk to someone immediately, \
please reach out to a trusted person or a local helpline.";

const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "self-harm",
    "hurt myself",
    "no reason to live",
];

/// A helpline shown alongside replies to at-risk messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
}

pub const CRISIS_RESOURCES: &[CrisisResource] = &[
    CrisisResource {
        name: "988 Suicide & Crisis Lifeline (US)",
        contact: "Call or text 988",
    },
    CrisisResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
    },
    CrisisResource {
        name: "International Association for Suicide Prevention",
        contact: "https://www.iasp.info/resources/Crisis_Centres/",
    },
];

/// Whether a message contains a crisis phrase (case-insensitive).
pub fn detect_crisis(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CRISIS_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// System prompt for one turn, with the safety addendum when needed.
pub fn system_prompt(crisis: bool) -> String {
    if crisis {
        format!("{}\n\n{}", COMPANION_SYSTEM_PROMPT, SAFETY_ADDENDUM)
    } else {
        COMPANION_SYSTEM_PROMPT.to_string()
    }
}
