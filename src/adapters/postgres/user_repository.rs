//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error, timestamp_column, user_id_column};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turns a unique violation on `users_email_key` into `EmailTaken`.
fn map_write_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() && db.constraint() == Some("users_email_key") => {
            DomainError::new(
                ErrorCode::EmailTaken,
                "Email is already registered to another account",
            )
        }
        _ => DomainError::database(format!("{}: {}", context, e)),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, bio, image_url, created_at, updated_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch user"))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, bio, image_url, created_at, updated_at
            FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch user by email"))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, bio, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.name())
        .bind(user.bio())
        .bind(user.image_url())
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_write_error("Failed to insert user"))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                name = $3,
                bio = $4,
                image_url = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.name())
        .bind(user.bio())
        .bind(user.image_url())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_write_error("Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            ));
        }

        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    Ok(User::reconstitute(
        user_id_column(row, "id")?,
        column(row, "email")?,
        column(row, "name")?,
        column(row, "bio")?,
        column(row, "image_url")?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
