//! GetChatHistoryHandler - The caller's conversation, oldest first.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatMessage};
use crate::domain::foundation::UserId;
use crate::ports::ChatRepository;

pub const DEFAULT_HISTORY_LIMIT: u32 = 50;
pub const MAX_HISTORY_LIMIT: u32 = 200;

#[derive(Debug, Clone)]
pub struct GetChatHistoryQuery {
    pub user_id: UserId,
    pub limit: Option<u32>,
}

impl GetChatHistoryQuery {
    fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

pub struct GetChatHistoryHandler {
    repository: Arc<dyn ChatRepository>,
}

impl GetChatHistoryHandler {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetChatHistoryQuery) -> Result<Vec<ChatMessage>, ChatError> {
        let limit = query.effective_limit();
        Ok(self.repository.recent(&query.user_id, limit).await?)
    }
}
