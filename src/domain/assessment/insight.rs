//! Summary and recommendations attached to an assessment.
//!
//! The AI provider is asked for a small JSON object; when the call fails or
//! the reply cannot be parsed, a fixed insight for the wellness level is used.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scoring::{Answer, AssessmentAnalytics, AssessmentScore, WellnessLevel};

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Where an insight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Ai,
    Fallback,
}

impl InsightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightSource::Ai => "ai",
            InsightSource::Fallback => "fallback",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(InsightSource::Ai),
            "fallback" => Some(InsightSource::Fallback),
            _ => None,
        }
    }
}

/// Summary text plus actionable recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub source: InsightSource,
}

/// Why a model reply could not be turned into an [`Insight`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightParseError {
    #[error("reply contains no JSON object")]
    NoJsonObject,

    #[error("reply JSON is malformed: {0}")]
    Malformed(String),

    #[error("reply has an empty summary")]
    EmptySummary,
}

/// The hardcoded insight for a wellness level.
pub fn default_insight(level: WellnessLevel) -> Insight {
    let (summary, recommendations): (&str, [&str; 3]) = match level {
        WellnessLevel::Thriving => (
            "Your responses suggest you are in a good place emotionally. Keep nurturing the habits that support you.",
            [
                "Keep a regular sleep and exercise routine.",
                "Note what is going well in a gratitude journal.",
                "Share your strategies with the community to support others.",
            ],
        ),
        WellnessLevel::Stable => (
            "Your responses suggest you are generally coping well, with a few areas that could use attention.",
            [
                "Try a short daily mindfulness or breathing practice.",
                "Stay connected with friends or family this week.",
                "Journal about situations that felt stressful to spot patterns.",
            ],
        ),
        WellnessLevel::Struggling => (
            "Your responses suggest you are going through a difficult period. Small, steady steps can help.",
            [
                "Schedule one calming activity each day, such as a guided meditation.",
                "Reach out to someone you trust and talk about how you feel.",
                "Consider speaking with a counsellor or mental-health professional.",
            ],
        ),
        WellnessLevel::InDistress => (
            "Your responses suggest you are under significant strain right now. You do not have to handle this alone.",
            [
                "Please consider contacting a mental-health professional soon.",
                "If you feel unsafe, call your local emergency number or a crisis line right away.",
                "Lean on a trusted person today and let them know what you are going through.",
            ],
        ),
    };

    Insight {
        summary: summary.to_string(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        source: InsightSource::Fallback,
    }
}

#[derive(Debug, Deserialize)]
struct RawInsight {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

/// Extracts an insight from a raw model reply.
///
/// Accepts bare JSON, JSON wrapped in Markdown fences, or JSON embedded in
/// prose: the outermost `{...}` span is parsed. Recommendations are trimmed,
/// empties dropped and the list capped; an empty list is replaced by the
/// level's defaults.
pub fn parse_ai_insight(reply: &str, level: WellnessLevel) -> Result<Insight, InsightParseError> {
    let start = reply.find('{').ok_or(InsightParseError::NoJsonObject)?;
    let end = reply.rfind('}').ok_or(InsightParseError::NoJsonObject)?;
    if end < start {
        return Err(InsightParseError::NoJsonObject);
    }

    let raw: RawInsight = serde_json::from_str(&reply[start..=end])
        .map_err(|e| InsightParseError::Malformed(e.to_string()))?;

    let summary = raw
        .summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(InsightParseError::EmptySummary)?;

    let mut recommendations: Vec<String> = raw
        .recommendations
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .collect();

    if recommendations.is_empty() {
        recommendations = default_insight(level).recommendations;
    }

    Ok(Insight {
        summary,
        recommendations,
        source: InsightSource::Ai,
    })
}

/// System prompt for assessment insights.
pub const INSIGHT_SYSTEM_PROMPT: &str = "You are a compassionate mental-wellbeing assistant. \
You are not a doctor and never diagnose. Reply ONLY with a JSON object of the form \
{\"summary\": string, \"recommendations\": [string]} with a two to three sentence summary \
and three to five short, practical recommendations.";

/// User prompt describing one answer sheet and its derived numbers.
pub fn build_insight_prompt(
    answers: &[Answer],
    score: &AssessmentScore,
    analytics: &AssessmentAnalytics,
) -> String {
    let mut prompt = format!(
        "A user completed a wellbeing questionnaire on a 1-5 scale (5 = healthiest).\n\
         Total score: {}/{} ({}%). Average: {:.1}. Wellness level: {}.\n\
         Estimated emotions: happy {}%, calm {}%, anxious {}%, sad {}%.\n",
        score.total,
        score.max,
        score.percentage,
        score.average,
        analytics.wellness_level.as_str(),
        analytics.emotions.happy,
        analytics.emotions.calm,
        analytics.emotions.anxious,
        analytics.emotions.sad,
    );

    prompt.push_str("Category averages:\n");
    for category in &analytics.category_scores {
        prompt.push_str(&format!("- {}: {:.1}\n", category.category, category.average));
    }

    prompt.push_str("Answers:\n");
    for answer in answers {
        prompt.push_str(&format!("- {}: {}\n", answer.question_id, answer.score));
    }

    prompt
}
