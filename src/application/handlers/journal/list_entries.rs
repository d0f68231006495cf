//! ListEntriesHandler - A page of the caller's journal, newest first.

use std::sync::Arc;

use crate::domain::foundation::{Page, PageRequest, UserId};
use crate::domain::journal::{JournalEntry, JournalError, Mood};
use crate::ports::{JournalFilter, JournalRepository};

#[derive(Debug, Clone)]
pub struct ListEntriesQuery {
    pub user_id: UserId,
    pub mood: Option<Mood>,
    pub page: PageRequest,
}

pub struct ListEntriesHandler {
    repository: Arc<dyn JournalRepository>,
}

impl ListEntriesHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListEntriesQuery) -> Result<Page<JournalEntry>, JournalError> {
        let filter = JournalFilter { mood: query.mood };
        Ok(self
            .repository
            .list_by_user(&query.user_id, filter, query.page)
            .await?)
    }
}
