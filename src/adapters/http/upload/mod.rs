//! HTTP adapter for image uploads.

mod handlers;
mod routes;

pub use handlers::UploadHandlers;
pub use routes::upload_routes;
