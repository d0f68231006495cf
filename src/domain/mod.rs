//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, pagination, errors)
//! - `assessment` - Questionnaire scoring, emotion analytics and insights
//! - `chat` - Companion conversation messages and crisis detection
//! - `journal` - Private diary entries with mood and tags
//! - `forum` - Community posts and replies
//! - `meditation` - Static guided meditation catalog
//! - `user` - Profiles synced from login and the dashboard read model
//! - `upload` - Image upload validation and content addressing

pub mod assessment;
pub mod chat;
pub mod forum;
pub mod foundation;
pub mod journal;
pub mod meditation;
pub mod upload;
pub mod user;
