//! Community forum posts and replies.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    required_text, AuthenticatedUser, PostId, ReplyId, Timestamp, UserId, ValidationError,
};

pub const MAX_POST_TITLE_LENGTH: usize = 200;
pub const MAX_POST_CONTENT_LENGTH: usize = 10_000;
pub const MAX_REPLY_CONTENT_LENGTH: usize = 5_000;

/// Name shown in place of the author for anonymous content.
pub const ANONYMOUS_NAME: &str = "Anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    #[default]
    General,
    Anxiety,
    Depression,
    Stress,
    Relationships,
    SelfCare,
    SuccessStories,
}

impl PostCategory {
    pub const ALL: [PostCategory; 7] = [
        PostCategory::General,
        PostCategory::Anxiety,
        PostCategory::Depression,
        PostCategory::Stress,
        PostCategory::Relationships,
        PostCategory::SelfCare,
        PostCategory::SuccessStories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::General => "general",
            PostCategory::Anxiety => "anxiety",
            PostCategory::Depression => "depression",
            PostCategory::Stress => "stress",
            PostCategory::Relationships => "relationships",
            PostCategory::SelfCare => "self_care",
            PostCategory::SuccessStories => "success_stories",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        PostCategory::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Who wrote a piece of forum content, captured at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub name: String,
}

impl Author {
    /// Resolves the public name: profile name, then token name, then email local part.
    pub fn resolve(user: &AuthenticatedUser, profile_name: Option<&str>) -> Self {
        let name = profile_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| user.public_name());
        Self {
            id: user.id.clone(),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    author_id: UserId,
    author_name: String,
    title: String,
    content: String,
    category: PostCategory,
    anonymous: bool,
    reply_count: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Post {
    pub fn new(
        id: PostId,
        author: Author,
        title: &str,
        content: &str,
        category: PostCategory,
        anonymous: bool,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id,
            author_id: author.id,
            author_name: author.name,
            title: required_text("title", title, MAX_POST_TITLE_LENGTH)?,
            content: required_text("content", content, MAX_POST_CONTENT_LENGTH)?,
            category,
            anonymous,
            reply_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PostId,
        author_id: UserId,
        author_name: String,
        title: String,
        content: String,
        category: PostCategory,
        anonymous: bool,
        reply_count: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id,
            author_name,
            title,
            content,
            category,
            anonymous,
            reply_count,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Stored author name, regardless of anonymity. Never send this to clients.
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> PostCategory {
        self.category
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn reply_count(&self) -> u32 {
        self.reply_count
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Name safe to show publicly.
    pub fn public_author_name(&self) -> &str {
        if self.anonymous {
            ANONYMOUS_NAME
        } else {
            &self.author_name
        }
    }

    /// Author id safe to show publicly; hidden for anonymous posts.
    pub fn public_author_id(&self) -> Option<&UserId> {
        (!self.anonymous).then_some(&self.author_id)
    }

    pub fn record_reply(&mut self) {
        self.reply_count = self.reply_count.saturating_add(1);
        self.updated_at = Timestamp::now();
    }

    pub fn remove_reply(&mut self) {
        self.reply_count = self.reply_count.saturating_sub(1);
        self.updated_at = Timestamp::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    id: ReplyId,
    post_id: PostId,
    author_id: UserId,
    author_name: String,
    content: String,
    anonymous: bool,
    created_at: Timestamp,
}

impl Reply {
    pub fn new(
        id: ReplyId,
        post_id: PostId,
        author: Author,
        content: &str,
        anonymous: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            post_id,
            author_id: author.id,
            author_name: author.name,
            content: required_text("content", content, MAX_REPLY_CONTENT_LENGTH)?,
            anonymous,
            created_at: Timestamp::now(),
        })
    }

    pub fn reconstitute(
        id: ReplyId,
        post_id: PostId,
        author_id: UserId,
        author_name: String,
        content: String,
        anonymous: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            post_id,
            author_id,
            author_name,
            content,
            anonymous,
            created_at,
        }
    }

    pub fn id(&self) -> &ReplyId {
        &self.id
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    pub fn public_author_name(&self) -> &str {
        if self.anonymous {
            ANONYMOUS_NAME
        } else {
            &self.author_name
        }
    }

    pub fn public_author_id(&self) -> Option<&UserId> {
        (!self.anonymous).then_some(&self.author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-1").unwrap(),
            "sam@example.com",
            Some("Sam T".to_string()),
        )
    }

    fn author() -> Author {
        Author::resolve(&user(), None)
    }

    #[test]
    fn author_prefers_profile_name() {
        assert_eq!(Author::resolve(&user(), Some("Samantha")).name, "Samantha");
        assert_eq!(Author::resolve(&user(), Some("  ")).name, "Sam T");
    }

    #[test]
    fn author_falls_back_to_email_local_part() {
        let bare = AuthenticatedUser::new(UserId::new("u").unwrap(), "quiet@example.com", None);
        assert_eq!(Author::resolve(&bare, None).name, "quiet");
    }

    #[test]
    fn post_validates_title_and_content() {
        assert!(Post::new(PostId::new(), author(), "", "body", PostCategory::General, false).is_err());
        assert!(Post::new(PostId::new(), author(), "Title", " ", PostCategory::General, false).is_err());
        let long = "t".repeat(MAX_POST_TITLE_LENGTH + 1);
        assert!(Post::new(PostId::new(), author(), &long, "body", PostCategory::General, false).is_err());
    }

    #[test]
    fn anonymous_post_hides_author() {
        let post =
            Post::new(PostId::new(), author(), "Hi", "body", PostCategory::Anxiety, true).unwrap();
        assert_eq!(post.public_author_name(), ANONYMOUS_NAME);
        assert!(post.public_author_id().is_none());
        assert_eq!(post.author_name(), "Sam T");
    }

    #[test]
    fn reply_count_never_goes_negative() {
        let mut post =
            Post::new(PostId::new(), author(), "Hi", "body", PostCategory::General, false).unwrap();
        post.remove_reply();
        assert_eq!(post.reply_count(), 0);
        post.record_reply();
        post.record_reply();
        post.remove_reply();
        assert_eq!(post.reply_count(), 1);
    }

    #[test]
    fn reply_validates_content() {
        let long = "r".repeat(MAX_REPLY_CONTENT_LENGTH + 1);
        assert!(Reply::new(ReplyId::new(), PostId::new(), author(), &long, false).is_err());
        let reply = Reply::new(ReplyId::new(), PostId::new(), author(), " thanks ", true).unwrap();
        assert_eq!(reply.content(), "thanks");
        assert_eq!(reply.public_author_name(), ANONYMOUS_NAME);
    }

    #[test]
    fn category_round_trips_through_str() {
        for c in PostCategory::ALL {
            assert_eq!(PostCategory::parse(c.as_str()), Some(c));
        }
        assert_eq!(
            serde_json::to_string(&PostCategory::SelfCare).unwrap(),
            "\"self_care\""
        );
    }
}
