//! PostgreSQL implementation of ForumRepository.
//!
//! Reply inserts and deletes run in a transaction with the parent's
//! `reply_count` update. Deleting a post relies on `ON DELETE CASCADE`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, count_to_u64, db_error, timestamp_column, user_id_column};
use crate::domain::forum::{Post, PostCategory, Reply};
use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, PostId, ReplyId, UserId,
};
use crate::ports::ForumRepository;

const POST_COLUMNS: &str = "id, author_id, author_name, title, content, category, anonymous, \
                            reply_count, created_at, updated_at";

const REPLY_COLUMNS: &str = "id, post_id, author_id, author_name, content, anonymous, created_at";

#[derive(Clone)]
pub struct PostgresForumRepository {
    pool: PgPool,
}

impl PostgresForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumRepository for PostgresForumRepository {
    async fn insert_post(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(&format!(
            "INSERT INTO forum_posts ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            POST_COLUMNS
        ))
        .bind(post.id().as_uuid())
        .bind(post.author_id().as_str())
        .bind(post.author_name())
        .bind(post.title())
        .bind(post.content())
        .bind(post.category().as_str())
        .bind(post.is_anonymous())
        .bind(post.reply_count() as i32)
        .bind(post.created_at().as_datetime())
        .bind(post.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert post"))?;

        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM forum_posts WHERE id = $1", POST_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch post"))?;

        row.map(|r| row_to_post(&r)).transpose()
    }

    async fn list_posts(
        &self,
        category: Option<PostCategory>,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let category = category.map(|c| c.as_str());

        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM forum_posts WHERE ($1::TEXT IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count posts"))?;

        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM forum_posts
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            POST_COLUMNS
        ))
        .bind(category)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list posts"))?;

        let items = rows.iter().map(row_to_post).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, count_to_u64(total.0), page))
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM forum_posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete post"))?;

        Ok(())
    }

    async fn add_reply(&self, reply: &Reply) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let updated = sqlx::query(
            r#"
            UPDATE forum_posts
            SET reply_count = reply_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(reply.post_id().as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to bump reply count"))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("Post not found: {}", reply.post_id()),
            ));
        }

        sqlx::query(&format!(
            "INSERT INTO forum_replies ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            REPLY_COLUMNS
        ))
        .bind(reply.id().as_uuid())
        .bind(reply.post_id().as_uuid())
        .bind(reply.author_id().as_str())
        .bind(reply.author_name())
        .bind(reply.content())
        .bind(reply.is_anonymous())
        .bind(reply.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to insert reply"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(())
    }

    async fn find_reply(&self, id: &ReplyId) -> Result<Option<Reply>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM forum_replies WHERE id = $1",
            REPLY_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch reply"))?;

        row.map(|r| row_to_reply(&r)).transpose()
    }

    async fn list_replies(&self, post_id: &PostId) -> Result<Vec<Reply>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM forum_replies WHERE post_id = $1 ORDER BY created_at ASC",
            REPLY_COLUMNS
        ))
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list replies"))?;

        rows.iter().map(row_to_reply).collect()
    }

    async fn delete_reply(&self, reply: &Reply) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let deleted = sqlx::query("DELETE FROM forum_replies WHERE id = $1")
            .bind(reply.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete reply"))?;

        if deleted.rows_affected() > 0 {
            sqlx::query(
                r#"
                UPDATE forum_posts
                SET reply_count = GREATEST(reply_count - 1, 0), updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(reply.post_id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to decrement reply count"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(())
    }

    async fn count_posts_by_author(&self, author_id: &UserId) -> Result<u64, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM forum_posts WHERE author_id = $1")
                .bind(author_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count posts"))?;

        Ok(count_to_u64(result.0))
    }
}

fn row_to_post(row: &PgRow) -> Result<Post, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let category_str: String = column(row, "category")?;
    let category = PostCategory::parse(&category_str)
        .ok_or_else(|| DomainError::database(format!("Invalid category: {}", category_str)))?;
    let reply_count: i32 = column(row, "reply_count")?;

    Ok(Post::reconstitute(
        PostId::from_uuid(id),
        user_id_column(row, "author_id")?,
        column(row, "author_name")?,
        column(row, "title")?,
        column(row, "content")?,
        category,
        column(row, "anonymous")?,
        u32::try_from(reply_count).unwrap_or(0),
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}

fn row_to_reply(row: &PgRow) -> Result<Reply, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let post_id: uuid::Uuid = column(row, "post_id")?;

    Ok(Reply::reconstitute(
        ReplyId::from_uuid(id),
        PostId::from_uuid(post_id),
        user_id_column(row, "author_id")?,
        column(row, "author_name")?,
        column(row, "content")?,
        column(row, "anonymous")?,
        timestamp_column(row, "created_at")?,
    ))
}
