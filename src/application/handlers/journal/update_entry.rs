//! UpdateEntryHandler - Replaces the editable fields of a journal entry.

use std::sync::Arc;

use super::load_owned;
use crate::domain::foundation::{JournalEntryId, UserId};
use crate::domain::journal::{JournalDraft, JournalEntry, JournalError, Mood};
use crate::ports::JournalRepository;

/// Full replacement of title, content, mood and tags.
#[derive(Debug, Clone)]
pub struct UpdateEntryCommand {
    pub entry_id: JournalEntryId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
}

pub struct UpdateEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl UpdateEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateEntryCommand) -> Result<JournalEntry, JournalError> {
        let mut entry = load_owned(self.repository.as_ref(), cmd.entry_id, &cmd.user_id).await?;

        let draft = JournalDraft::new(cmd.title.as_deref(), &cmd.content, cmd.mood, &cmd.tags)?;
        entry.revise(draft);

        self.repository.update(&entry).await?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryJournalRepository;

    async fn seeded() -> (Arc<InMemoryJournalRepository>, JournalEntry) {
        let repo = Arc::new(InMemoryJournalRepository::new());
        let entry = JournalEntry::new(
            JournalEntryId::new(),
            UserId::new("owner").unwrap(),
            JournalDraft::new(Some("Old"), "old text", Some(Mood::Low), &[]).unwrap(),
        );
        repo.insert(&entry).await.unwrap();
        (repo, entry)
    }

    fn command(entry: &JournalEntry, user: &str, content: &str) -> UpdateEntryCommand {
        UpdateEntryCommand {
            entry_id: *entry.id(),
            user_id: UserId::new(user).unwrap(),
            title: None,
            content: content.to_string(),
            mood: Some(Mood::Great),
            tags: vec!["progress".to_string()],
        }
    }

    #[tokio::test]
    async fn owner_replaces_fields() {
        let (repo, entry) = seeded().await;
        let handler = UpdateEntryHandler::new(repo.clone());

        let updated = handler.handle(command(&entry, "owner", "new text")).await.unwrap();

        assert_eq!(updated.title(), None);
        assert_eq!(updated.content(), "new text");
        assert_eq!(updated.mood(), Some(Mood::Great));
        let stored = repo.find_by_id(entry.id()).await.unwrap().unwrap();
        assert_eq!(stored.content(), "new text");
        assert!(stored.updated_at() >= stored.created_at());
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let (repo, entry) = seeded().await;
        let handler = UpdateEntryHandler::new(repo.clone());

        let result = handler.handle(command(&entry, "intruder", "hijack")).await;

        assert_eq!(result, Err(JournalError::Forbidden));
        let stored = repo.find_by_id(entry.id()).await.unwrap().unwrap();
        assert_eq!(stored.content(), "old text");
    }

    #[tokio::test]
    async fn invalid_update_leaves_entry_untouched() {
        let (repo, entry) = seeded().await;
        let handler = UpdateEntryHandler::new(repo.clone());

        let result = handler.handle(command(&entry, "owner", "")).await;

        assert!(matches!(result, Err(JournalError::ValidationFailed { .. })));
        let stored = repo.find_by_id(entry.id()).await.unwrap().unwrap();
        assert_eq!(stored.content(), "old text");
    }
}
