//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (dto, handlers, routes);
//! `router` mounts them all under `/api`.

pub mod assessment;
pub mod chat;
pub mod error;
pub mod forum;
pub mod health;
pub mod journal;
pub mod meditation;
pub mod middleware;
pub mod pagination;
pub mod router;
pub mod trace;
pub mod upload;
pub mod user;

pub use error::ErrorResponse;
pub use router::{api_router, app_router, AppPorts, HttpOptions};
