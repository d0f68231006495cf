//! PostgreSQL implementation of ChatRepository.
//!
//! Messages are ordered by a `BIGSERIAL` sequence rather than `created_at`,
//! so a user message and its reply written in the same millisecond keep
//! their order.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, count_to_u64, db_error, timestamp_column, user_id_column};
use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::foundation::{ChatMessageId, DomainError, UserId};
use crate::ports::ChatRepository;

#[derive(Clone)]
pub struct PostgresChatRepository {
    pool: PgPool,
}

impl PostgresChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PostgresChatRepository {
    async fn append(&self, message: &ChatMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, user_id, role, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.user_id().as_str())
        .bind(message.role().as_str())
        .bind(message.content())
        .bind(message.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert chat message"))?;

        Ok(())
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, role, content, created_at FROM (
                SELECT id, user_id, role, content, created_at, seq
                FROM chat_messages
                WHERE user_id = $1
                ORDER BY seq DESC
                LIMIT $2
            ) recent
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch chat history"))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn clear(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to clear chat history"))?;

        Ok(result.rows_affected())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM chat_messages WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count chat messages"))?;

        Ok(count_to_u64(result.0))
    }
}

fn row_to_message(row: &PgRow) -> Result<ChatMessage, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let role_str: String = column(row, "role")?;
    let role = ChatRole::parse(&role_str)
        .ok_or_else(|| DomainError::database(format!("Invalid chat role: {}", role_str)))?;

    Ok(ChatMessage::reconstitute(
        ChatMessageId::from_uuid(id),
        user_id_column(row, "user_id")?,
        role,
        column(row, "content")?,
        timestamp_column(row, "created_at")?,
    ))
}
