//! DeleteEntryHandler - Removes one of the caller's journal entries.

use std::sync::Arc;

use super::load_owned;
use crate::domain::foundation::{JournalEntryId, UserId};
use crate::domain::journal::JournalError;
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct DeleteEntryCommand {
    pub entry_id: JournalEntryId,
    pub user_id: UserId,
}

pub struct DeleteEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl DeleteEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteEntryCommand) -> Result<(), JournalError> {
        load_owned(self.repository.as_ref(), cmd.entry_id, &cmd.user_id).await?;
        self.repository.delete(&cmd.entry_id).await?;
        Ok(())
    }
}
