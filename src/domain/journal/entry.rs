//! Journal entry entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    optional_text, required_text, JournalEntryId, Timestamp, UserId, ValidationError,
};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CONTENT_LENGTH: usize = 20_000;
pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_LENGTH: usize = 32;

/// Self-reported mood attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Low,
    Awful,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Okay, Mood::Low, Mood::Awful];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Low => "low",
            Mood::Awful => "awful",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Mood::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

/// Validated user input for creating or replacing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDraft {
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
}

impl JournalDraft {
    pub fn new(
        title: Option<&str>,
        content: &str,
        mood: Option<Mood>,
        tags: &[String],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: optional_text("title", title, MAX_TITLE_LENGTH)?,
            content: required_text("content", content, MAX_CONTENT_LENGTH)?,
            mood,
            tags: normalize_tags(tags)?,
        })
    }
}

/// Lowercases, trims and deduplicates tags, preserving first-seen order.
fn normalize_tags(tags: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(ValidationError::too_long("tags", MAX_TAG_LENGTH));
        }
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    if normalized.len() > MAX_TAGS {
        return Err(ValidationError::out_of_range(
            "tags",
            0,
            MAX_TAGS as i64,
            normalized.len() as i64,
        ));
    }
    Ok(normalized)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    id: JournalEntryId,
    user_id: UserId,
    title: Option<String>,
    content: String,
    mood: Option<Mood>,
    tags: Vec<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl JournalEntry {
    pub fn new(id: JournalEntryId, user_id: UserId, draft: JournalDraft) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            title: draft.title,
            content: draft.content,
            mood: draft.mood,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: JournalEntryId,
        user_id: UserId,
        title: Option<String>,
        content: String,
        mood: Option<Mood>,
        tags: Vec<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            content,
            mood,
            tags,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields and bumps `updated_at`.
    pub fn revise(&mut self, draft: JournalDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.mood = draft.mood;
        self.tags = draft.tags;
        self.updated_at = Timestamp::now();
    }

    pub fn id(&self) -> &JournalEntryId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
