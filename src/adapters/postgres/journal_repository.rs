//! PostgreSQL implementation of JournalRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, count_to_u64, db_error, timestamp_column, user_id_column};
use crate::domain::foundation::{
    DomainError, ErrorCode, JournalEntryId, Page, PageRequest, UserId,
};
use crate::domain::journal::{JournalEntry, Mood};
use crate::ports::{JournalFilter, JournalRepository};

#[derive(Clone)]
pub struct PostgresJournalRepository {
    pool: PgPool,
}

impl PostgresJournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalRepository for PostgresJournalRepository {
    async fn insert(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (
                id, user_id, title, content, mood, tags, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.user_id().as_str())
        .bind(entry.title())
        .bind(entry.content())
        .bind(entry.mood().map(|m| m.as_str()))
        .bind(entry.tags())
        .bind(entry.created_at().as_datetime())
        .bind(entry.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert journal entry"))?;

        Ok(())
    }

    async fn update(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries SET
                title = $2,
                content = $3,
                mood = $4,
                tags = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.title())
        .bind(entry.content())
        .bind(entry.mood().map(|m| m.as_str()))
        .bind(entry.tags())
        .bind(entry.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update journal entry"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::JournalEntryNotFound,
                format!("Journal entry not found: {}", entry.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &JournalEntryId) -> Result<Option<JournalEntry>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, content, mood, tags, created_at, updated_at
            FROM journal_entries WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch journal entry"))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: JournalFilter,
        page: PageRequest,
    ) -> Result<Page<JournalEntry>, DomainError> {
        let mood = filter.mood.map(|m| m.as_str());

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM journal_entries
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR mood = $2)
            "#,
        )
        .bind(user_id.as_str())
        .bind(mood)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count journal entries"))?;

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, content, mood, tags, created_at, updated_at
            FROM journal_entries
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR mood = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id.as_str())
        .bind(mood)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list journal entries"))?;

        let items = rows
            .iter()
            .map(row_to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, count_to_u64(total.0), page))
    }

    async fn delete(&self, id: &JournalEntryId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM journal_entries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete journal entry"))?;

        Ok(())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM journal_entries WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count journal entries"))?;

        Ok(count_to_u64(result.0))
    }

    async fn mood_counts(&self, user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT mood, COUNT(*) FROM journal_entries
            WHERE user_id = $1 AND mood IS NOT NULL
            GROUP BY mood
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count journal moods"))?;

        // Unknown mood strings are skipped rather than failing the dashboard.
        Ok(rows
            .into_iter()
            .filter_map(|(mood, count)| Mood::parse(&mood).map(|m| (m, count_to_u64(count))))
            .collect())
    }
}

fn row_to_entry(row: &PgRow) -> Result<JournalEntry, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let mood_str: Option<String> = column(row, "mood")?;
    let mood = match mood_str {
        Some(s) => Some(
            Mood::parse(&s)
                .ok_or_else(|| DomainError::database(format!("Invalid mood: {}", s)))?,
        ),
        None => None,
    };

    Ok(JournalEntry::reconstitute(
        JournalEntryId::from_uuid(id),
        user_id_column(row, "user_id")?,
        column(row, "title")?,
        column(row, "content")?,
        mood,
        column(row, "tags")?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
