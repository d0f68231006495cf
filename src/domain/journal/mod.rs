//! Journal module - private, mood-tagged diary entries.

mod entry;
mod errors;

pub use entry::{
    JournalDraft, JournalEntry, Mood, MAX_CONTENT_LENGTH, MAX_TAGS, MAX_TAG_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use errors::JournalError;
