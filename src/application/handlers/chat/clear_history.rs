//! ClearChatHistoryHandler - Deletes the caller's whole conversation.

use std::sync::Arc;

use crate::domain::chat::ChatError;
use crate::domain::foundation::UserId;
use crate::ports::ChatRepository;

#[derive(Debug, Clone)]
pub struct ClearChatHistoryCommand {
    pub user_id: UserId,
}

pub struct ClearChatHistoryHandler {
    repository: Arc<dyn ChatRepository>,
}

impl ClearChatHistoryHandler {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// Returns the number of deleted messages.
    pub async fn handle(&self, cmd: ClearChatHistoryCommand) -> Result<u64, ChatError> {
        let deleted = self.repository.clear(&cmd.user_id).await?;
        tracing::info!(deleted, "Chat history cleared");
        Ok(deleted)
    }
}
