use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::lock;
use crate::domain::foundation::{
    DomainError, ErrorCode, JournalEntryId, Page, PageRequest, UserId,
};
use crate::domain::journal::{JournalEntry, Mood};
use crate::ports::{JournalFilter, JournalRepository};

#[derive(Debug, Default)]
pub struct InMemoryJournalRepository {
    entries: Mutex<Vec<JournalEntry>>,
}

impl InMemoryJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalRepository for InMemoryJournalRepository {
    async fn insert(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        lock(&self.entries).push(entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        let mut entries = lock(&self.entries);
        match entries.iter_mut().find(|e| e.id() == entry.id()) {
            Some(slot) => {
                *slot = entry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::JournalEntryNotFound,
                format!("Journal entry not found: {}", entry.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &JournalEntryId) -> Result<Option<JournalEntry>, DomainError> {
        Ok(lock(&self.entries).iter().find(|e| e.id() == id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: JournalFilter,
        page: PageRequest,
    ) -> Result<Page<JournalEntry>, DomainError> {
        let mut matching: Vec<JournalEntry> = lock(&self.entries)
            .iter()
            .rev()
            .filter(|e| e.is_owned_by(user_id))
            .filter(|e| filter.mood.map_or(true, |m| e.mood() == Some(m)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(Page::from_sorted(matching, page))
    }

    async fn delete(&self, id: &JournalEntryId) -> Result<(), DomainError> {
        lock(&self.entries).retain(|e| e.id() != id);
        Ok(())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(lock(&self.entries)
            .iter()
            .filter(|e| e.is_owned_by(user_id))
            .count() as u64)
    }

    async fn mood_counts(&self, user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError> {
        let mut counts: BTreeMap<Mood, u64> = BTreeMap::new();
        for entry in lock(&self.entries).iter().filter(|e| e.is_owned_by(user_id)) {
            if let Some(mood) = entry.mood() {
                *counts.entry(mood).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::JournalDraft;

    fn entry(user: &str, content: &str, mood: Option<Mood>) -> JournalEntry {
        JournalEntry::new(
            JournalEntryId::new(),
            UserId::new(user).unwrap(),
            JournalDraft::new(None, content, mood, &[]).unwrap(),
        )
    }

    #[tokio::test]
    async fn list_filters_by_mood_and_paginates() {
        let repo = InMemoryJournalRepository::new();
        let user = UserId::new("u").unwrap();
        for i in 0..3 {
            repo.insert(&entry("u", &format!("good {}", i), Some(Mood::Good)))
                .await
                .unwrap();
        }
        repo.insert(&entry("u", "low day", Some(Mood::Low))).await.unwrap();
        repo.insert(&entry("other", "not mine", Some(Mood::Good))).await.unwrap();

        let page = repo
            .list_by_user(
                &user,
                JournalFilter { mood: Some(Mood::Good) },
                PageRequest::new(Some(1), Some(2)),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.items[0].content(), "good 2");
    }

    #[tokio::test]
    async fn mood_counts_skip_entries_without_mood() {
        let repo = InMemoryJournalRepository::new();
        let user = UserId::new("u").unwrap();
        repo.insert(&entry("u", "a", Some(Mood::Great))).await.unwrap();
        repo.insert(&entry("u", "b", Some(Mood::Great))).await.unwrap();
        repo.insert(&entry("u", "c", None)).await.unwrap();

        let counts = repo.mood_counts(&user).await.unwrap();

        assert_eq!(counts, vec![(Mood::Great, 2)]);
    }

    #[tokio::test]
    async fn update_missing_entry_fails() {
        let repo = InMemoryJournalRepository::new();
        let err = repo.update(&entry("u", "x", None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::JournalEntryNotFound);
    }
}
