//! HTTP adapter for the meditation library. Read-only and public.

mod dto;
mod handlers;
mod routes;

pub use dto::{ListMeditationsParams, MeditationListResponse};
pub use routes::meditation_routes;
