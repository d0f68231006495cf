//! User module - profile records synced from login, plus the dashboard read model.

mod dashboard;
mod errors;
mod profile;

pub use dashboard::{ActivityCounts, Dashboard, LatestAssessment, MoodDistribution};
pub use errors::UserError;
pub use profile::{
    validate_email, ProfileUpdate, User, MAX_BIO_LENGTH, MAX_IMAGE_URL_LENGTH, MAX_NAME_LENGTH,
};
