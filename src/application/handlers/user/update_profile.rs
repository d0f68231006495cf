//! UpdateProfileHandler - Edits name, bio and avatar.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{ProfileUpdate, User, UserError};
use crate::ports::UserRepository;

/// Full replacement of the editable profile fields.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, UserError> {
        let update = ProfileUpdate::new(
            cmd.name.as_deref(),
            cmd.bio.as_deref(),
            cmd.image_url.as_deref(),
        )?;

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(UserError::NotFound(cmd.user_id))?;

        user.apply_update(update);
        self.users.update(&user).await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::AuthenticatedUser;

    async fn seeded() -> Arc<InMemoryUserRepository> {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::from_claims(&AuthenticatedUser::new(
            UserId::new("u1").unwrap(),
            "u1@example.com",
            None,
        ))
        .unwrap();
        users.insert(&user).await.unwrap();
        users
    }

    fn command(bio: &str, image_url: Option<&str>) -> UpdateProfileCommand {
        UpdateProfileCommand {
            user_id: UserId::new("u1").unwrap(),
            name: Some("Sam".to_string()),
            bio: Some(bio.to_string()),
            image_url: image_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn updates_profile_fields() {
        let users = seeded().await;
        let handler = UpdateProfileHandler::new(users.clone());

        let user = handler
            .handle(command("Learning to slow down", Some("/uploads/abc.png")))
            .await
            .unwrap();

        assert_eq!(user.name(), Some("Sam"));
        assert_eq!(user.image_url(), Some("/uploads/abc.png"));
        let stored = users.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.bio(), Some("Learning to slow down"));
    }

    #[tokio::test]
    async fn rejects_overlong_bio() {
        let handler = UpdateProfileHandler::new(seeded().await);

        let result = handler.handle(command(&"x".repeat(501), None)).await;

        assert!(matches!(result, Err(UserError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn rejects_non_http_image_url() {
        let handler = UpdateProfileHandler::new(seeded().await);

        let result = handler.handle(command("", Some("javascript:alert(1)"))).await;

        assert!(matches!(result, Err(UserError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let handler = UpdateProfileHandler::new(Arc::new(InMemoryUserRepository::new()));

        let result = handler.handle(command("bio", None)).await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
