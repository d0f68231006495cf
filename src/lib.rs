//! Mindspace - Mental-health support backend
//!
//! Self-assessments with AI insight, a companion chat, private journaling,
//! community forums and a guided meditation library, served as a JSON API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
