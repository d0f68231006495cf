//! Chat module - conversations with the AI support companion.

mod companion;
mod errors;
mod message;

pub use companion::{
    detect_crisis, system_prompt, CrisisResource, COMPANION_SYSTEM_PROMPT, CONTEXT_WINDOW,
    CRISIS_RESOURCES, FALLBACK_REPLY, SAFETY_ADDENDUM,
};
pub use errors::ChatError;
pub use message::{ChatMessage, ChatRole, MAX_MESSAGE_LENGTH};
