//! User command and query handlers: login sync, profile and dashboard.

mod get_dashboard;
mod get_profile;
mod sync_session;
mod update_profile;

pub use get_dashboard::{GetDashboardHandler, GetDashboardQuery};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use sync_session::{SyncSessionCommand, SyncSessionHandler, SyncSessionResult};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
