use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;
use crate::domain::forum::{Post, PostCategory, Reply};
use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, PostId, ReplyId, UserId,
};
use crate::ports::ForumRepository;

#[derive(Debug, Default)]
struct ForumState {
    posts: Vec<Post>,
    replies: Vec<Reply>,
}

/// Posts and replies behind one lock so reply counts stay consistent.
#[derive(Debug, Default)]
pub struct InMemoryForumRepository {
    state: Mutex<ForumState>,
}

impl InMemoryForumRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn post_not_found(id: &PostId) -> DomainError {
    DomainError::new(ErrorCode::PostNotFound, format!("Post not found: {}", id))
}

#[async_trait]
impl ForumRepository for InMemoryForumRepository {
    async fn insert_post(&self, post: &Post) -> Result<(), DomainError> {
        lock(&self.state).posts.push(post.clone());
        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        Ok(lock(&self.state).posts.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_posts(
        &self,
        category: Option<PostCategory>,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let mut matching: Vec<Post> = lock(&self.state)
            .posts
            .iter()
            .rev()
            .filter(|p| category.map_or(true, |c| p.category() == c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(Page::from_sorted(matching, page))
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), DomainError> {
        let mut state = lock(&self.state);
        state.posts.retain(|p| p.id() != id);
        state.replies.retain(|r| r.post_id() != id);
        Ok(())
    }

    async fn add_reply(&self, reply: &Reply) -> Result<(), DomainError> {
        let mut state = lock(&self.state);
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id() == reply.post_id())
            .ok_or_else(|| post_not_found(reply.post_id()))?;
        post.record_reply();
        state.replies.push(reply.clone());
        Ok(())
    }

    async fn find_reply(&self, id: &ReplyId) -> Result<Option<Reply>, DomainError> {
        Ok(lock(&self.state).replies.iter().find(|r| r.id() == id).cloned())
    }

    async fn list_replies(&self, post_id: &PostId) -> Result<Vec<Reply>, DomainError> {
        let mut replies: Vec<Reply> = lock(&self.state)
            .replies
            .iter()
            .filter(|r| r.post_id() == post_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(replies)
    }

    async fn delete_reply(&self, reply: &Reply) -> Result<(), DomainError> {
        let mut state = lock(&self.state);
        let before = state.replies.len();
        state.replies.retain(|r| r.id() != reply.id());
        if state.replies.len() < before {
            if let Some(post) = state.posts.iter_mut().find(|p| p.id() == reply.post_id()) {
                post.remove_reply();
            }
        }
        Ok(())
    }

    async fn count_posts_by_author(&self, author_id: &UserId) -> Result<u64, DomainError> {
        Ok(lock(&self.state)
            .posts
            .iter()
            .filter(|p| p.is_authored_by(author_id))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forum::Author;

    fn author(id: &str) -> Author {
        Author {
            id: UserId::new(id).unwrap(),
            name: id.to_string(),
        }
    }

    fn post(category: PostCategory) -> Post {
        Post::new(PostId::new(), author("alice"), "Title", "Body", category, false).unwrap()
    }

    #[tokio::test]
    async fn replies_keep_count_in_step() {
        let repo = InMemoryForumRepository::new();
        let p = post(PostCategory::General);
        repo.insert_post(&p).await.unwrap();

        let reply = Reply::new(ReplyId::new(), *p.id(), author("bob"), "Same here", false).unwrap();
        repo.add_reply(&reply).await.unwrap();
        assert_eq!(repo.find_post(p.id()).await.unwrap().unwrap().reply_count(), 1);

        repo.delete_reply(&reply).await.unwrap();
        assert_eq!(repo.find_post(p.id()).await.unwrap().unwrap().reply_count(), 0);

        // A second delete of the same reply is a no-op.
        repo.delete_reply(&reply).await.unwrap();
        assert_eq!(repo.find_post(p.id()).await.unwrap().unwrap().reply_count(), 0);
    }

    #[tokio::test]
    async fn reply_to_missing_post_fails() {
        let repo = InMemoryForumRepository::new();
        let reply = Reply::new(ReplyId::new(), PostId::new(), author("bob"), "hi", false).unwrap();

        let err = repo.add_reply(&reply).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PostNotFound);
    }

    #[tokio::test]
    async fn delete_post_cascades() {
        let repo = InMemoryForumRepository::new();
        let p = post(PostCategory::Anxiety);
        repo.insert_post(&p).await.unwrap();
        let reply = Reply::new(ReplyId::new(), *p.id(), author("bob"), "hi", false).unwrap();
        repo.add_reply(&reply).await.unwrap();

        repo.delete_post(p.id()).await.unwrap();

        assert!(repo.find_reply(reply.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_category() {
        let repo = InMemoryForumRepository::new();
        repo.insert_post(&post(PostCategory::Anxiety)).await.unwrap();
        repo.insert_post(&post(PostCategory::Stress)).await.unwrap();

        let page = repo
            .list_posts(Some(PostCategory::Stress), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].category(), PostCategory::Stress);
        assert_eq!(
            repo.count_posts_by_author(&UserId::new("alice").unwrap()).await.unwrap(),
            2
        );
    }
}
