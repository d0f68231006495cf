//! CreateEntryHandler - Command handler for new journal entries.

use std::sync::Arc;

use crate::domain::foundation::{JournalEntryId, UserId};
use crate::domain::journal::{JournalDraft, JournalEntry, JournalError, Mood};
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct CreateEntryCommand {
    pub user_id: UserId,
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
}

pub struct CreateEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl CreateEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateEntryCommand) -> Result<JournalEntry, JournalError> {
        let draft = JournalDraft::new(cmd.title.as_deref(), &cmd.content, cmd.mood, &cmd.tags)?;
        let entry = JournalEntry::new(JournalEntryId::new(), cmd.user_id, draft);

        self.repository.insert(&entry).await?;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryJournalRepository;

    fn command(content: &str) -> CreateEntryCommand {
        CreateEntryCommand {
            user_id: UserId::new("writer").unwrap(),
            title: Some("  Morning  ".to_string()),
            content: content.to_string(),
            mood: Some(Mood::Good),
            tags: vec!["Sleep".to_string(), "sleep".to_string()],
        }
    }

    #[tokio::test]
    async fn creates_and_persists_entry() {
        let repo = Arc::new(InMemoryJournalRepository::new());
        let handler = CreateEntryHandler::new(repo.clone());

        let entry = handler.handle(command("Slept well")).await.unwrap();

        assert_eq!(entry.title(), Some("Morning"));
        assert_eq!(entry.tags(), &["sleep".to_string()]);
        assert!(repo.find_by_id(entry.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn empty_content_fails_validation() {
        let repo = Arc::new(InMemoryJournalRepository::new());
        let handler = CreateEntryHandler::new(repo.clone());

        let result = handler.handle(command("  ")).await;

        assert!(matches!(
            result,
            Err(JournalError::ValidationFailed { ref field, .. }) if field == "content"
        ));
        assert_eq!(repo.count_by_user(&UserId::new("writer").unwrap()).await.unwrap(), 0);
    }
}
