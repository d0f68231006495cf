//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - User records synced from login
//! - `AssessmentRepository` - Scored assessments and their trend
//! - `ChatRepository` - Companion conversation history
//! - `JournalRepository` - Journal entries
//! - `ForumRepository` - Community posts and replies
//!
//! ## External Service Ports
//!
//! - `AIProvider` - Hosted language models
//! - `SessionValidator` - Bearer token validation
//! - `FileStorage` - Uploaded file blobs

mod ai_provider;
mod assessment_repository;
mod chat_repository;
mod file_storage;
mod forum_repository;
mod journal_repository;
mod session_validator;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionPurpose, CompletionRequest, CompletionResponse, FinishReason,
    Message, MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use assessment_repository::AssessmentRepository;
pub use chat_repository::ChatRepository;
pub use file_storage::{validate_key, FileStorage, StorageError};
pub use forum_repository::ForumRepository;
pub use journal_repository::{JournalFilter, JournalRepository};
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
