//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) live side by side in
//! each module's directory.

pub mod handlers;

pub use handlers::{assessment, chat, forum, journal, upload, user};
