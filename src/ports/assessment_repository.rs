//! AssessmentRepository port for assessment persistence.

use async_trait::async_trait;

use crate::domain::assessment::{Assessment, TrendPoint};
use crate::domain::foundation::{AssessmentId, DomainError, UserId};

#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Persist a newly created assessment.
    async fn save(&self, assessment: &Assessment) -> Result<(), DomainError>;

    /// Find an assessment by ID regardless of owner.
    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, DomainError>;

    /// All assessments of a user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Assessment>, DomainError>;

    /// Most recent assessment of a user.
    async fn latest_by_user(&self, user_id: &UserId) -> Result<Option<Assessment>, DomainError>;

    /// (created_at, percentage) for every assessment of a user, oldest first.
    async fn trend_points(&self, user_id: &UserId) -> Result<Vec<TrendPoint>, DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Delete an assessment. Deleting a missing ID is not an error.
    async fn delete(&self, id: &AssessmentId) -> Result<(), DomainError>;
}
