//! Storage Adapters
//!
//! Implementations of the FileStorage port for user uploads.
//!
//! ## Available Adapters
//!
//! - **LocalFileStorage** - Content-addressed files in a local directory
//! - **InMemoryFileStorage** - Keeps files in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{LocalFileStorage, InMemoryFileStorage};
//!
//! // Production: disk, served back under /uploads
//! let storage = LocalFileStorage::new("./data/uploads", "/uploads");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryFileStorage::new();
//! ```

mod in_memory_file_storage;
mod local_file_storage;

pub use in_memory_file_storage::InMemoryFileStorage;
pub use local_file_storage::LocalFileStorage;
