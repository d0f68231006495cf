//! ForumRepository port for posts and replies.

use async_trait::async_trait;

use crate::domain::forum::{Post, PostCategory, Reply};
use crate::domain::foundation::{DomainError, Page, PageRequest, PostId, ReplyId, UserId};

/// Repository for community posts and their replies.
///
/// # Contract
///
/// - `add_reply` and `delete_reply` keep the parent post's `reply_count`
///   in step with the stored replies
/// - `delete_post` removes the post's replies as well
#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn insert_post(&self, post: &Post) -> Result<(), DomainError>;

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// A page of posts, newest first.
    async fn list_posts(
        &self,
        category: Option<PostCategory>,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError>;

    async fn delete_post(&self, id: &PostId) -> Result<(), DomainError>;

    async fn add_reply(&self, reply: &Reply) -> Result<(), DomainError>;

    async fn find_reply(&self, id: &ReplyId) -> Result<Option<Reply>, DomainError>;

    /// Replies of a post, oldest first.
    async fn list_replies(&self, post_id: &PostId) -> Result<Vec<Reply>, DomainError>;

    async fn delete_reply(&self, reply: &Reply) -> Result<(), DomainError>;

    async fn count_posts_by_author(&self, author_id: &UserId) -> Result<u64, DomainError>;
}
