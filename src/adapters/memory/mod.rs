//! In-memory repository adapters.
//!
//! Every persistence port has an implementation here backed by a
//! `std::sync::Mutex`. They serve unit and integration tests and local
//! development without a database.
//!
//! ## Usage
//!
//! ```ignore
//! let journal = Arc::new(InMemoryJournalRepository::new());
//! let handler = CreateEntryHandler::new(journal.clone());
//! ```

mod assessment_repository;
mod chat_repository;
mod forum_repository;
mod journal_repository;
mod user_repository;

pub use assessment_repository::InMemoryAssessmentRepository;
pub use chat_repository::InMemoryChatRepository;
pub use forum_repository::InMemoryForumRepository;
pub use journal_repository::InMemoryJournalRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Locks a mutex, recovering the data if a panicking test poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
