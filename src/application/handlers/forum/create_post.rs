//! CreatePostHandler - Command handler for new community posts.

use std::sync::Arc;

use super::resolve_author;
use crate::domain::forum::{ForumError, Post, PostCategory};
use crate::domain::foundation::{AuthenticatedUser, PostId};
use crate::ports::{ForumRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub author: AuthenticatedUser,
    pub title: String,
    pub content: String,
    pub category: PostCategory,
    pub anonymous: bool,
}

pub struct CreatePostHandler {
    forum: Arc<dyn ForumRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreatePostHandler {
    pub fn new(forum: Arc<dyn ForumRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { forum, users }
    }

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<Post, ForumError> {
        let author = resolve_author(self.users.as_ref(), &cmd.author).await?;
        let post = Post::new(
            PostId::new(),
            author,
            &cmd.title,
            &cmd.content,
            cmd.category,
            cmd.anonymous,
        )?;

        self.forum.insert_post(&post).await?;

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryForumRepository, InMemoryUserRepository};
    use crate::domain::forum::ANONYMOUS_NAME;
    use crate::domain::foundation::UserId;
    use crate::domain::user::{ProfileUpdate, User};

    fn author() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("alice").unwrap(),
            "alice@example.com",
            Some("Alice Token".to_string()),
        )
    }

    fn command(anonymous: bool) -> CreatePostCommand {
        CreatePostCommand {
            author: author(),
            title: "Coping with exams".to_string(),
            content: "What helps you?".to_string(),
            category: PostCategory::Stress,
            anonymous,
        }
    }

    #[tokio::test]
    async fn uses_profile_name_when_set() {
        let forum = Arc::new(InMemoryForumRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = User::from_claims(&author()).unwrap();
        user.apply_update(ProfileUpdate::new(Some("Ali"), None, None).unwrap());
        users.insert(&user).await.unwrap();
        let handler = CreatePostHandler::new(forum.clone(), users);

        let post = handler.handle(command(false)).await.unwrap();

        assert_eq!(post.public_author_name(), "Ali");
        assert!(forum.find_post(post.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn falls_back_to_token_name() {
        let handler = CreatePostHandler::new(
            Arc::new(InMemoryForumRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        );

        let post = handler.handle(command(false)).await.unwrap();

        assert_eq!(post.public_author_name(), "Alice Token");
    }

    #[tokio::test]
    async fn anonymous_post_hides_author() {
        let handler = CreatePostHandler::new(
            Arc::new(InMemoryForumRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        );

        let post = handler.handle(command(true)).await.unwrap();

        assert_eq!(post.public_author_name(), ANONYMOUS_NAME);
        assert!(post.public_author_id().is_none());
        assert!(post.is_authored_by(&UserId::new("alice").unwrap()));
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let handler = CreatePostHandler::new(
            Arc::new(InMemoryForumRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        );
        let mut cmd = command(false);
        cmd.title = String::new();

        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(ForumError::ValidationFailed { .. })));
    }
}
