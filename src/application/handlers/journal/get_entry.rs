//! GetEntryHandler - Query handler for one journal entry.

use std::sync::Arc;

use super::load_owned;
use crate::domain::foundation::{JournalEntryId, UserId};
use crate::domain::journal::{JournalEntry, JournalError};
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct GetEntryQuery {
    pub entry_id: JournalEntryId,
    pub user_id: UserId,
}

pub struct GetEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl GetEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetEntryQuery) -> Result<JournalEntry, JournalError> {
        load_owned(self.repository.as_ref(), query.entry_id, &query.user_id).await
    }
}
