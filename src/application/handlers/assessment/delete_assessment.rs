//! DeleteAssessmentHandler - Removes one of the caller's assessments.

use std::sync::Arc;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{AssessmentId, UserId};
use crate::ports::AssessmentRepository;

#[derive(Debug, Clone)]
pub struct DeleteAssessmentCommand {
    pub assessment_id: AssessmentId,
    pub user_id: UserId,
}

pub struct DeleteAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl DeleteAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteAssessmentCommand) -> Result<(), AssessmentError> {
        let assessment = self
            .repository
            .find_by_id(&cmd.assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(cmd.assessment_id))?;

        if !assessment.is_owned_by(&cmd.user_id) {
            return Err(AssessmentError::Forbidden);
        }

        self.repository.delete(&cmd.assessment_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssessmentRepository;
    use crate::domain::assessment::{default_insight, Answer, Assessment, ScoredSheet};

    async fn seeded(owner: &str) -> (Arc<InMemoryAssessmentRepository>, AssessmentId) {
        let repo = Arc::new(InMemoryAssessmentRepository::new());
        let sheet = ScoredSheet::evaluate(vec![Answer::new("q1", 2)]).unwrap();
        let insight = default_insight(sheet.analytics.wellness_level);
        let assessment =
            Assessment::new(AssessmentId::new(), UserId::new(owner).unwrap(), sheet, insight);
        repo.save(&assessment).await.unwrap();
        (repo, *assessment.id())
    }

    #[tokio::test]
    async fn owner_deletes() {
        let (repo, id) = seeded("owner").await;
        let handler = DeleteAssessmentHandler::new(repo.clone());

        handler
            .handle(DeleteAssessmentCommand {
                assessment_id: id,
                user_id: UserId::new("owner").unwrap(),
            })
            .await
            .unwrap();

        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let (repo, id) = seeded("owner").await;
        let handler = DeleteAssessmentHandler::new(repo.clone());

        let result = handler
            .handle(DeleteAssessmentCommand {
                assessment_id: id,
                user_id: UserId::new("someone-else").unwrap(),
            })
            .await;

        assert_eq!(result, Err(AssessmentError::Forbidden));
        assert!(repo.find_by_id(&id).await.unwrap().is_some());
    }
}
