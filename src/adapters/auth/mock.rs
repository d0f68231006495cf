//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` port with a fixed token table, so tests
//! and local development never need a real identity provider.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_test_user("token-alice", "alice");
//!
//! let user = validator.validate("token-alice").await?;
//! assert_eq!(user.email, "alice@test.example.com");
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_tokens(&self) -> RwLockReadGuard<'_, HashMap<String, AuthenticatedUser>> {
        self.tokens.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_tokens(&self) -> RwLockWriteGuard<'_, HashMap<String, AuthenticatedUser>> {
        self.tokens.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a token for a user named after `user_id`.
    ///
    /// Blank ids are ignored rather than panicking, since `UserId` rejects them.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => {
                let user = AuthenticatedUser::new(
                    id,
                    format!("{}@test.example.com", user_id),
                    Some(format!("Test User {}", user_id)),
                );
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.write_tokens().insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.write_tokens().remove(token);
    }

    pub fn token_count(&self) -> usize {
        self.read_tokens().len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.read_tokens()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_returns_user() {
        let validator = MockSessionValidator::new().with_test_user("tok", "alice");

        let user = validator.validate("tok").await.unwrap();

        assert_eq!(user.id.as_str(), "alice");
        assert_eq!(user.email, "alice@test.example.com");
        assert_eq!(user.display_name.as_deref(), Some("Test User alice"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(
            validator.validate("nope").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("tok", "alice")
            .with_error(AuthError::service_unavailable("idp down"));

        assert!(validator.validate("tok").await.unwrap_err().is_transient());
    }

    #[tokio::test]
    async fn tokens_can_be_added_and_removed() {
        let validator = MockSessionValidator::new().with_test_user("a", "alice");
        validator.add_token(
            "b",
            AuthenticatedUser::new(UserId::new("bob").unwrap(), "bob@example.com", None),
        );
        assert_eq!(validator.token_count(), 2);

        validator.remove_token("a");
        assert!(validator.validate("a").await.is_err());
        assert!(validator.validate("b").await.is_ok());
    }

    #[test]
    fn blank_test_user_is_skipped() {
        let validator = MockSessionValidator::new().with_test_user("tok", " ");
        assert_eq!(validator.token_count(), 0);
    }
}
