//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped by
//! module. Each handler owns `Arc`s to the ports it needs and exposes a
//! single `handle` method.

pub mod ai_budget;
pub mod assessment;
pub mod chat;
pub mod forum;
pub mod journal;
pub mod upload;
pub mod user;
