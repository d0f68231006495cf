//! Assessment entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssessmentId, Timestamp, UserId, ValidationError};

use super::insight::Insight;
use super::scoring::{
    calculate_analytics, score_answers, validate_answers, Answer, AssessmentAnalytics,
    AssessmentScore,
};

/// A scored questionnaire with its analytics and insight.
///
/// # Invariants
///
/// - `answers` passed validation (1-50 answers, scores 1-5)
/// - `score` and `analytics` are derived from `answers` at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    id: AssessmentId,
    user_id: UserId,
    answers: Vec<Answer>,
    score: AssessmentScore,
    analytics: AssessmentAnalytics,
    insight: Insight,
    created_at: Timestamp,
}

/// Validated answers with their derived numbers, ready for insight generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSheet {
    pub answers: Vec<Answer>,
    pub score: AssessmentScore,
    pub analytics: AssessmentAnalytics,
}

impl ScoredSheet {
    /// Validates and scores raw answers.
    pub fn evaluate(answers: Vec<Answer>) -> Result<Self, ValidationError> {
        let answers = validate_answers(answers)?;
        let score = score_answers(&answers);
        let analytics = calculate_analytics(&answers);
        Ok(Self {
            answers,
            score,
            analytics,
        })
    }
}

impl Assessment {
    /// Creates a new assessment from a scored sheet and its insight.
    pub fn new(id: AssessmentId, user_id: UserId, sheet: ScoredSheet, insight: Insight) -> Self {
        Self {
            id,
            user_id,
            answers: sheet.answers,
            score: sheet.score,
            analytics: sheet.analytics,
            insight,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AssessmentId,
        user_id: UserId,
        answers: Vec<Answer>,
        score: AssessmentScore,
        analytics: AssessmentAnalytics,
        insight: Insight,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            answers,
            score,
            analytics,
            insight,
            created_at,
        }
    }

    pub fn id(&self) -> &AssessmentId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn score(&self) -> &AssessmentScore {
        &self.score
    }

    pub fn analytics(&self) -> &AssessmentAnalytics {
        &self.analytics
    }

    pub fn insight(&self) -> &Insight {
        &self.insight
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Whether the given user owns this assessment.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::insight::default_insight;
    use crate::domain::assessment::scoring::WellnessLevel;

    #[test]
    fn evaluate_scores_validated_answers() {
        let sheet = ScoredSheet::evaluate(vec![Answer::new("q1", 5), Answer::new("q2", 5)]).unwrap();
        assert_eq!(sheet.score.percentage, 100);
        assert_eq!(sheet.analytics.wellness_level, WellnessLevel::Thriving);
    }

    #[test]
    fn evaluate_rejects_invalid_answers() {
        assert!(ScoredSheet::evaluate(vec![Answer::new("q1", 9)]).is_err());
    }

    #[test]
    fn new_assessment_carries_sheet_and_owner() {
        let user = UserId::new("user-1").unwrap();
        let sheet = ScoredSheet::evaluate(vec![Answer::new("q1", 2)]).unwrap();
        let insight = default_insight(sheet.analytics.wellness_level);
        let assessment = Assessment::new(AssessmentId::new(), user.clone(), sheet, insight);

        assert!(assessment.is_owned_by(&user));
        assert!(!assessment.is_owned_by(&UserId::new("user-2").unwrap()));
        assert_eq!(assessment.score().percentage, 40);
        assert_eq!(assessment.answers().len(), 1);
    }
}
