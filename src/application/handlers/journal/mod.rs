//! Journal command and query handlers.

mod create_entry;
mod delete_entry;
mod get_entry;
mod list_entries;
mod update_entry;

pub use create_entry::{CreateEntryCommand, CreateEntryHandler};
pub use delete_entry::{DeleteEntryCommand, DeleteEntryHandler};
pub use get_entry::{GetEntryHandler, GetEntryQuery};
pub use list_entries::{ListEntriesHandler, ListEntriesQuery};
pub use update_entry::{UpdateEntryCommand, UpdateEntryHandler};

use crate::domain::foundation::{JournalEntryId, UserId};
use crate::domain::journal::{JournalEntry, JournalError};
use crate::ports::JournalRepository;

/// Loads an entry and checks that `user_id` owns it.
async fn load_owned(
    repository: &dyn JournalRepository,
    id: JournalEntryId,
    user_id: &UserId,
) -> Result<JournalEntry, JournalError> {
    let entry = repository
        .find_by_id(&id)
        .await?
        .ok_or(JournalError::NotFound(id))?;

    if !entry.is_owned_by(user_id) {
        return Err(JournalError::Forbidden);
    }

    Ok(entry)
}
