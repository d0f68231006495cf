//! HTTP adapter for journal endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{JournalEntryRequest, JournalEntryResponse, ListJournalParams};
pub use handlers::JournalHandlers;
pub use routes::journal_routes;
