//! GetAssessmentHandler - Query handler for a single assessment.

use std::sync::Arc;

use crate::domain::assessment::{Assessment, AssessmentError};
use crate::domain::foundation::{AssessmentId, UserId};
use crate::ports::AssessmentRepository;

#[derive(Debug, Clone)]
pub struct GetAssessmentQuery {
    pub assessment_id: AssessmentId,
    pub user_id: UserId,
}

pub struct GetAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl GetAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetAssessmentQuery) -> Result<Assessment, AssessmentError> {
        let assessment = self
            .repository
            .find_by_id(&query.assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(query.assessment_id))?;

        // Authorization check - ensure user owns the assessment
        if !assessment.is_owned_by(&query.user_id) {
            return Err(AssessmentError::Forbidden);
        }

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssessmentRepository;
    use crate::domain::assessment::{default_insight, Answer, ScoredSheet};

    async fn seeded() -> (Arc<InMemoryAssessmentRepository>, Assessment) {
        let repo = Arc::new(InMemoryAssessmentRepository::new());
        let sheet = ScoredSheet::evaluate(vec![Answer::new("q1", 4)]).unwrap();
        let insight = default_insight(sheet.analytics.wellness_level);
        let assessment =
            Assessment::new(AssessmentId::new(), UserId::new("owner").unwrap(), sheet, insight);
        repo.save(&assessment).await.unwrap();
        (repo, assessment)
    }

    #[tokio::test]
    async fn owner_can_read() {
        let (repo, assessment) = seeded().await;
        let handler = GetAssessmentHandler::new(repo);

        let found = handler
            .handle(GetAssessmentQuery {
                assessment_id: *assessment.id(),
                user_id: UserId::new("owner").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(found.id(), assessment.id());
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let (repo, assessment) = seeded().await;
        let handler = GetAssessmentHandler::new(repo);

        let result = handler
            .handle(GetAssessmentQuery {
                assessment_id: *assessment.id(),
                user_id: UserId::new("intruder").unwrap(),
            })
            .await;

        assert_eq!(result, Err(AssessmentError::Forbidden));
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let handler = GetAssessmentHandler::new(Arc::new(InMemoryAssessmentRepository::new()));
        let id = AssessmentId::new();

        let result = handler
            .handle(GetAssessmentQuery {
                assessment_id: id,
                user_id: UserId::new("owner").unwrap(),
            })
            .await;

        assert_eq!(result, Err(AssessmentError::NotFound(id)));
    }
}
