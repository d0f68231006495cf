use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;
use crate::domain::assessment::{Assessment, TrendPoint};
use crate::domain::foundation::{AssessmentId, DomainError, UserId};
use crate::ports::AssessmentRepository;

/// Assessments kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryAssessmentRepository {
    assessments: Mutex<Vec<Assessment>>,
}

impl InMemoryAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first; ties keep the later insert first.
    fn owned_by(&self, user_id: &UserId) -> Vec<Assessment> {
        let mut owned: Vec<Assessment> = lock(&self.assessments)
            .iter()
            .rev()
            .filter(|a| a.is_owned_by(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        owned
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn save(&self, assessment: &Assessment) -> Result<(), DomainError> {
        lock(&self.assessments).push(assessment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, DomainError> {
        Ok(lock(&self.assessments).iter().find(|a| a.id() == id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Assessment>, DomainError> {
        Ok(self.owned_by(user_id))
    }

    async fn latest_by_user(&self, user_id: &UserId) -> Result<Option<Assessment>, DomainError> {
        Ok(self.owned_by(user_id).into_iter().next())
    }

    async fn trend_points(&self, user_id: &UserId) -> Result<Vec<TrendPoint>, DomainError> {
        Ok(self
            .owned_by(user_id)
            .into_iter()
            .rev()
            .map(|a| TrendPoint {
                taken_at: *a.created_at(),
                percentage: a.score().percentage,
            })
            .collect())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(lock(&self.assessments)
            .iter()
            .filter(|a| a.is_owned_by(user_id))
            .count() as u64)
    }

    async fn delete(&self, id: &AssessmentId) -> Result<(), DomainError> {
        lock(&self.assessments).retain(|a| a.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{default_insight, Answer, ScoredSheet};

    fn assessment(user: &str, score: u8) -> Assessment {
        let sheet = ScoredSheet::evaluate(vec![Answer::new("q1", score)]).unwrap();
        let insight = default_insight(sheet.analytics.wellness_level);
        Assessment::new(AssessmentId::new(), UserId::new(user).unwrap(), sheet, insight)
    }

    #[tokio::test]
    async fn lists_only_the_owners_assessments_newest_first() {
        let repo = InMemoryAssessmentRepository::new();
        let first = assessment("alice", 2);
        let second = assessment("alice", 5);
        repo.save(&first).await.unwrap();
        repo.save(&assessment("bob", 3)).await.unwrap();
        repo.save(&second).await.unwrap();

        let alice = UserId::new("alice").unwrap();
        let listed = repo.list_by_user(&alice).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), second.id());
        assert_eq!(repo.latest_by_user(&alice).await.unwrap().unwrap().id(), second.id());
        assert_eq!(repo.count_by_user(&alice).await.unwrap(), 2);

        let points = repo.trend_points(&alice).await.unwrap();
        assert_eq!(points.iter().map(|p| p.percentage).collect::<Vec<_>>(), vec![40, 100]);
    }

    #[tokio::test]
    async fn delete_removes_assessment() {
        let repo = InMemoryAssessmentRepository::new();
        let a = assessment("alice", 3);
        repo.save(&a).await.unwrap();

        repo.delete(a.id()).await.unwrap();

        assert!(repo.find_by_id(a.id()).await.unwrap().is_none());
    }
}
