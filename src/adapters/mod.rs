//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Groq and Gemini completions, failover, mocks
//! - `auth` - OIDC bearer token validation
//! - `http` - axum REST surface
//! - `memory` - in-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories
//! - `storage` - uploaded file blobs

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
