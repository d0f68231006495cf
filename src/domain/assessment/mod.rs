//! Assessment module - questionnaire scoring, analytics and insights.

mod aggregate;
mod errors;
mod insight;
mod scoring;
mod trend;

pub use aggregate::{Assessment, ScoredSheet};
pub use errors::AssessmentError;
pub use insight::{
    build_insight_prompt, default_insight, parse_ai_insight, Insight, InsightParseError,
    InsightSource, INSIGHT_SYSTEM_PROMPT, MAX_RECOMMENDATIONS,
};
pub use scoring::{
    calculate_analytics, emotions_for_average, score_answers, validate_answers, Answer,
    AssessmentAnalytics, AssessmentScore, CategoryScore, EmotionBreakdown, WellnessLevel,
    MAX_ANSWERS, MAX_SCORE, MIN_SCORE,
};
pub use trend::{compute_trend, AssessmentTrend, TrendDirection, TrendPoint, TREND_THRESHOLD};
