use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;
use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ChatRepository;

#[derive(Debug, Default)]
pub struct InMemoryChatRepository {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn append(&self, message: &ChatMessage) -> Result<(), DomainError> {
        lock(&self.messages).push(message.clone());
        Ok(())
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, DomainError> {
        let messages = lock(&self.messages);
        let mut recent: Vec<ChatMessage> = messages
            .iter()
            .rev()
            .filter(|m| m.user_id() == user_id)
            .take(limit as usize)
            .cloned()
            .collect();
        recent.reverse();
        Ok(recent)
    }

    async fn clear(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut messages = lock(&self.messages);
        let before = messages.len();
        messages.retain(|m| m.user_id() != user_id);
        Ok((before - messages.len()) as u64)
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(lock(&self.messages)
            .iter()
            .filter(|m| m.user_id() == user_id)
            .count() as u64)
    }
}
