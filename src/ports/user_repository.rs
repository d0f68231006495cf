//! UserRepository port for user record persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository for user records keyed by identity-provider subject.
///
/// # Contract
///
/// - `insert` and `update` must return `ErrorCode::EmailTaken` when the email
///   already belongs to a different user
/// - Emails are stored lowercased; lookups compare exactly
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by subject.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user.
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user.
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
