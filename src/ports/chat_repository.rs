//! ChatRepository port for companion conversation history.

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId};

/// Append-only history of one conversation per user.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn append(&self, message: &ChatMessage) -> Result<(), DomainError>;

    /// The newest `limit` messages, returned oldest first.
    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, DomainError>;

    /// Deletes the whole history and returns how many messages were removed.
    async fn clear(&self, user_id: &UserId) -> Result<u64, DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
