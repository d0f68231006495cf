//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresUserRepository` - Users synced from login
//! - `PostgresAssessmentRepository` - Assessments with JSONB answers and analytics
//! - `PostgresChatRepository` - Companion conversation history
//! - `PostgresJournalRepository` - Journal entries with `TEXT[]` tags
//! - `PostgresForumRepository` - Posts and replies with transactional reply counts
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!` at startup.

mod assessment_repository;
mod chat_repository;
mod forum_repository;
mod journal_repository;
mod user_repository;

pub use assessment_repository::PostgresAssessmentRepository;
pub use chat_repository::PostgresChatRepository;
pub use forum_repository::PostgresForumRepository;
pub use journal_repository::PostgresJournalRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Maps a sqlx error into a database `DomainError` with context.
fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("{}: {}", context, e))
}

/// Reads a column, reporting the column name on failure.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn timestamp_column(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

fn user_id_column(row: &PgRow, name: &str) -> Result<UserId, DomainError> {
    let value: String = column(row, name)?;
    UserId::new(value).map_err(|e| DomainError::database(format!("Invalid {}: {}", name, e)))
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
