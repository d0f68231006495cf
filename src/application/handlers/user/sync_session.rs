//! SyncSessionHandler - Creates or refreshes the user record after login.
//!
//! The identity provider owns authentication; this handler only mirrors the
//! validated token claims into our `users` table.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct SyncSessionCommand {
    pub claims: AuthenticatedUser,
}

#[derive(Debug, Clone)]
pub struct SyncSessionResult {
    pub user: User,
    /// True on the first login.
    pub created: bool,
}

pub struct SyncSessionHandler {
    users: Arc<dyn UserRepository>,
}

impl SyncSessionHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SyncSessionCommand) -> Result<SyncSessionResult, UserError> {
        let claims = cmd.claims;

        if let Some(mut user) = self.users.find_by_id(&claims.id).await? {
            if user.sync_claims(&claims)? {
                self.ensure_email_free(&user).await?;
                self.users.update(&user).await?;
            }
            return Ok(SyncSessionResult {
                user,
                created: false,
            });
        }

        let user = User::from_claims(&claims)?;
        self.ensure_email_free(&user).await?;
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id(), "New user registered");

        Ok(SyncSessionResult {
            user,
            created: true,
        })
    }

    async fn ensure_email_free(&self, user: &User) -> Result<(), UserError> {
        match self.users.find_by_email(user.email()).await? {
            Some(existing) if existing.id() != user.id() => Err(UserError::EmailTaken),
            _ => Ok(()),
        }
    }
}
