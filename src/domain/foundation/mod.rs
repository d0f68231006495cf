//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, pagination and error types
//! that form the vocabulary of the Mindspace domain.

mod auth;
mod errors;
mod ids;
mod pagination;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{optional_text, required_text, DomainError, ErrorCode, ValidationError};
pub use ids::{AssessmentId, ChatMessageId, JournalEntryId, PostId, ReplyId, UserId};
pub use pagination::{Page, PageRequest, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use timestamp::Timestamp;
