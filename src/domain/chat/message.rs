//! Chat message entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{required_text, ChatMessageId, Timestamp, UserId, ValidationError};

/// Maximum characters a user may send in one message.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: ChatMessageId,
    user_id: UserId,
    role: ChatRole,
    content: String,
    created_at: Timestamp,
}

impl ChatMessage {
    /// A message typed by the user; content is validated.
    pub fn from_user(user_id: UserId, content: &str) -> Result<Self, ValidationError> {
        let content = required_text("message", content, MAX_MESSAGE_LENGTH)?;
        Ok(Self::build(user_id, ChatRole::User, content))
    }

    /// A reply produced by the assistant (or the fallback text).
    pub fn from_assistant(user_id: UserId, content: impl Into<String>) -> Self {
        Self::build(user_id, ChatRole::Assistant, content.into())
    }

    fn build(user_id: UserId, role: ChatRole, content: String) -> Self {
        Self {
            id: ChatMessageId::new(),
            user_id,
            role,
            content,
            created_at: Timestamp::now(),
        }
    }

    pub fn reconstitute(
        id: ChatMessageId,
        user_id: UserId,
        role: ChatRole,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            role,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> &ChatMessageId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn user_message_is_trimmed() {
        let msg = ChatMessage::from_user(user(), "  hello  ").unwrap();
        assert_eq!(msg.content(), "hello");
        assert_eq!(msg.role(), ChatRole::User);
    }

    #[test]
    fn user_message_rejects_empty_and_oversized() {
        assert!(ChatMessage::from_user(user(), "   ").is_err());
        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(ChatMessage::from_user(user(), &long).is_err());
    }

    #[test]
    fn role_parses_round_trip() {
        assert_eq!(ChatRole::parse(ChatRole::Assistant.as_str()), Some(ChatRole::Assistant));
        assert_eq!(ChatRole::parse("system"), None);
    }
}
