//! Forum command and query handlers.

mod create_post;
mod create_reply;
mod delete_post;
mod delete_reply;
mod get_post;
mod list_posts;

pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use create_reply::{CreateReplyCommand, CreateReplyHandler};
pub use delete_post::{DeletePostCommand, DeletePostHandler};
pub use delete_reply::{DeleteReplyCommand, DeleteReplyHandler};
pub use get_post::{GetPostHandler, GetPostQuery, PostWithReplies};
pub use list_posts::{ListPostsHandler, ListPostsQuery};

use crate::domain::forum::{Author, ForumError};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::UserRepository;

/// Resolves the display name stored with new forum content.
///
/// A profile name set by the user wins over the name in the token.
async fn resolve_author(
    users: &dyn UserRepository,
    user: &AuthenticatedUser,
) -> Result<Author, ForumError> {
    let profile = users.find_by_id(&user.id).await?;
    Ok(Author::resolve(user, profile.as_ref().and_then(|p| p.name())))
}
