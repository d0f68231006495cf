//! JournalRepository port for journal entry persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, JournalEntryId, Page, PageRequest, UserId};
use crate::domain::journal::{JournalEntry, Mood};

/// Optional filters for listing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JournalFilter {
    pub mood: Option<Mood>,
}

#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn insert(&self, entry: &JournalEntry) -> Result<(), DomainError>;

    async fn update(&self, entry: &JournalEntry) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &JournalEntryId) -> Result<Option<JournalEntry>, DomainError>;

    /// A page of the user's entries, newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: JournalFilter,
        page: PageRequest,
    ) -> Result<Page<JournalEntry>, DomainError>;

    async fn delete(&self, id: &JournalEntryId) -> Result<(), DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Number of entries per mood. Entries without a mood are not counted.
    async fn mood_counts(&self, user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError>;
}
