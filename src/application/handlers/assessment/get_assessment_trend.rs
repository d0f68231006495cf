//! GetAssessmentTrendHandler - Progress across the caller's assessments.

use std::sync::Arc;

use crate::domain::assessment::{compute_trend, AssessmentError, AssessmentTrend};
use crate::domain::foundation::UserId;
use crate::ports::AssessmentRepository;

#[derive(Debug, Clone)]
pub struct GetAssessmentTrendQuery {
    pub user_id: UserId,
}

pub struct GetAssessmentTrendHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl GetAssessmentTrendHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetAssessmentTrendQuery,
    ) -> Result<AssessmentTrend, AssessmentError> {
        let points = self.repository.trend_points(&query.user_id).await?;
        Ok(compute_trend(points))
    }
}
