//! CreateAssessmentHandler - Scores a questionnaire and attaches an insight.
//!
//! The insight comes from the AI provider when it answers with usable JSON.
//! Any provider failure, parse failure or elapsed AI budget is logged and
//! replaced by the fixed insight for the wellness level, so an assessment is
//! always stored.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::ai_budget::{complete_within, DEFAULT_AI_BUDGET};
use crate::domain::assessment::{
    build_insight_prompt, default_insight, parse_ai_insight, Answer, Assessment, AssessmentError,
    Insight, ScoredSheet, INSIGHT_SYSTEM_PROMPT,
};
use crate::domain::foundation::{AssessmentId, UserId};
use crate::ports::{
    AIProvider, AssessmentRepository, CompletionPurpose, CompletionRequest, MessageRole,
    RequestMetadata,
};

const INSIGHT_MAX_TOKENS: u32 = 600;
const INSIGHT_TEMPERATURE: f32 = 0.4;

/// Command to score and store a questionnaire.
#[derive(Debug, Clone)]
pub struct CreateAssessmentCommand {
    pub user_id: UserId,
    pub answers: Vec<Answer>,
    pub trace_id: String,
}

pub struct CreateAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
    ai_provider: Arc<dyn AIProvider>,
    ai_budget: Duration,
}

impl CreateAssessmentHandler {
    pub fn new(
        repository: Arc<dyn AssessmentRepository>,
        ai_provider: Arc<dyn AIProvider>,
    ) -> Self {
        Self {
            repository,
            ai_provider,
            ai_budget: DEFAULT_AI_BUDGET,
        }
    }

    /// Longest wait for the insight before the default is used.
    pub fn with_ai_budget(mut self, budget: Duration) -> Self {
        self.ai_budget = budget;
        self
    }

    pub async fn handle(&self, cmd: CreateAssessmentCommand) -> Result<Assessment, AssessmentError> {
        let sheet = ScoredSheet::evaluate(cmd.answers)?;
        let insight = self.generate_insight(&cmd.user_id, &cmd.trace_id, &sheet).await;

        let assessment = Assessment::new(AssessmentId::new(), cmd.user_id, sheet, insight);
        self.repository.save(&assessment).await?;

        tracing::info!(
            assessment_id = %assessment.id(),
            percentage = assessment.score().percentage,
            insight_source = assessment.insight().source.as_str(),
            "Assessment created"
        );

        Ok(assessment)
    }

    async fn generate_insight(&self, user_id: &UserId, trace_id: &str, sheet: &ScoredSheet) -> Insight {
        let level = sheet.analytics.wellness_level;
        let request = CompletionRequest::new(RequestMetadata::new(
            user_id.clone(),
            CompletionPurpose::AssessmentInsight,
            trace_id,
        ))
        .with_system_prompt(INSIGHT_SYSTEM_PROMPT)
        .with_message(
            MessageRole::User,
            build_insight_prompt(&sheet.answers, &sheet.score, &sheet.analytics),
        )
        .with_max_tokens(INSIGHT_MAX_TOKENS)
        .with_temperature(INSIGHT_TEMPERATURE);

        match complete_within(self.ai_provider.as_ref(), request, self.ai_budget).await {
            Ok(response) => match parse_ai_insight(&response.content, level) {
                Ok(insight) => insight,
                Err(err) => {
                    tracing::warn!(error = %err, trace_id, "Unusable AI insight, using default");
                    default_insight(level)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, trace_id, "AI insight unavailable, using default");
                default_insight(level)
            }
        }
    }
}
