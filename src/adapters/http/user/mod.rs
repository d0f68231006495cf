//! HTTP adapter for login sync, the profile and the dashboard.

mod dto;
mod handlers;
mod routes;

pub use dto::{SessionResponse, UpdateProfileRequest, UserProfileResponse};
pub use handlers::UserHandlers;
pub use routes::{auth_routes, user_routes};
