//! HTTP DTOs for assessment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    Answer, Assessment, AssessmentAnalytics, AssessmentScore, AssessmentTrend, TrendDirection,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentRequest {
    pub answers: Vec<Answer>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub id: String,
    pub answers: Vec<Answer>,
    pub score: AssessmentScore,
    pub analytics: AssessmentAnalytics,
    pub summary: String,
    pub recommendations: Vec<String>,
    /// `ai` or `fallback`
    pub insight_source: String,
    pub created_at: String,
}

impl From<&Assessment> for AssessmentResponse {
    fn from(assessment: &Assessment) -> Self {
        let insight = assessment.insight();
        Self {
            id: assessment.id().to_string(),
            answers: assessment.answers().to_vec(),
            score: *assessment.score(),
            analytics: assessment.analytics().clone(),
            summary: insight.summary.clone(),
            recommendations: insight.recommendations.clone(),
            insight_source: insight.source.as_str().to_string(),
            created_at: assessment.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPointResponse {
    pub created_at: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentTrendResponse {
    pub count: usize,
    pub average_percentage: Option<f64>,
    pub latest_percentage: Option<u8>,
    pub trend: TrendDirection,
    pub series: Vec<TrendPointResponse>,
}

impl From<AssessmentTrend> for AssessmentTrendResponse {
    fn from(trend: AssessmentTrend) -> Self {
        Self {
            count: trend.count,
            average_percentage: trend.average_percentage,
            latest_percentage: trend.latest_percentage,
            trend: trend.direction,
            series: trend
                .series
                .into_iter()
                .map(|p| TrendPointResponse {
                    created_at: p.taken_at.to_rfc3339(),
                    percentage: p.percentage,
                })
                .collect(),
        }
    }
}
