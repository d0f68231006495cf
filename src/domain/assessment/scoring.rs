//! Assessment scoring and analytics.
//!
//! Answers use a 1-5 agreement scale where 5 is the healthiest response.
//! Everything here is pure arithmetic over a validated answer list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
pub const MAX_ANSWERS: usize = 50;
pub const MAX_QUESTION_ID_LENGTH: usize = 64;

/// Category used for answers submitted without one.
pub const GENERAL_CATEGORY: &str = "general";

/// A single questionnaire answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub score: u8,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, score: u8) -> Self {
        Self {
            question_id: question_id.into(),
            category: None,
            score,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn category_key(&self) -> String {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
    }
}

/// Raw totals for an answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScore {
    pub total: u32,
    pub max: u32,
    /// `round(total / max * 100)`.
    pub percentage: u8,
    pub average: f64,
}

/// Percent split across four coarse emotions. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionBreakdown {
    pub happy: u8,
    pub calm: u8,
    pub anxious: u8,
    pub sad: u8,
}

impl EmotionBreakdown {
    const fn new(happy: u8, calm: u8, anxious: u8, sad: u8) -> Self {
        Self {
            happy,
            calm,
            anxious,
            sad,
        }
    }

    pub fn total(&self) -> u16 {
        u16::from(self.happy) + u16::from(self.calm) + u16::from(self.anxious) + u16::from(self.sad)
    }
}

/// Lower bound of the average score for each row, highest first.
const EMOTION_TABLE: [(f64, EmotionBreakdown); 3] = [
    (4.0, EmotionBreakdown::new(50, 30, 10, 10)),
    (3.0, EmotionBreakdown::new(35, 30, 20, 15)),
    (2.0, EmotionBreakdown::new(20, 20, 30, 30)),
];

const LOWEST_EMOTIONS: EmotionBreakdown = EmotionBreakdown::new(10, 10, 35, 45);

/// Looks up the emotion split for an average answer score.
pub fn emotions_for_average(average: f64) -> EmotionBreakdown {
    EMOTION_TABLE
        .iter()
        .find(|(floor, _)| average >= *floor)
        .map(|(_, split)| *split)
        .unwrap_or(LOWEST_EMOTIONS)
}

/// Coarse wellbeing bucket derived from the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellnessLevel {
    InDistress,
    Struggling,
    Stable,
    Thriving,
}

impl WellnessLevel {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80..=u8::MAX => WellnessLevel::Thriving,
            60..=79 => WellnessLevel::Stable,
            40..=59 => WellnessLevel::Struggling,
            _ => WellnessLevel::InDistress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WellnessLevel::Thriving => "thriving",
            WellnessLevel::Stable => "stable",
            WellnessLevel::Struggling => "struggling",
            WellnessLevel::InDistress => "in_distress",
        }
    }
}

/// Average score within one answer category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub average: f64,
    pub answered: u32,
}

/// Derived analytics stored alongside each assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentAnalytics {
    pub average_score: f64,
    pub emotions: EmotionBreakdown,
    pub wellness_level: WellnessLevel,
    pub category_scores: Vec<CategoryScore>,
}

/// Validates answers in place: trims ids and normalizes categories.
pub fn validate_answers(answers: Vec<Answer>) -> Result<Vec<Answer>, ValidationError> {
    if answers.is_empty() {
        return Err(ValidationError::empty_field("answers"));
    }
    if answers.len() > MAX_ANSWERS {
        return Err(ValidationError::out_of_range(
            "answers",
            1,
            MAX_ANSWERS as i64,
            answers.len() as i64,
        ));
    }

    answers
        .into_iter()
        .map(|answer| {
            let question_id = answer.question_id.trim().to_string();
            if question_id.is_empty() {
                return Err(ValidationError::empty_field("question_id"));
            }
            if question_id.chars().count() > MAX_QUESTION_ID_LENGTH {
                return Err(ValidationError::too_long("question_id", MAX_QUESTION_ID_LENGTH));
            }
            if !(MIN_SCORE..=MAX_SCORE).contains(&answer.score) {
                return Err(ValidationError::out_of_range(
                    "score",
                    i64::from(MIN_SCORE),
                    i64::from(MAX_SCORE),
                    i64::from(answer.score),
                ));
            }
            let category = answer
                .category
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty());
            Ok(Answer {
                question_id,
                category,
                score: answer.score,
            })
        })
        .collect()
}

/// Sums an answer sheet.
///
/// Callers pass answers that went through [`validate_answers`]; an empty
/// slice yields an all-zero score rather than dividing by zero.
pub fn score_answers(answers: &[Answer]) -> AssessmentScore {
    if answers.is_empty() {
        return AssessmentScore {
            total: 0,
            max: 0,
            percentage: 0,
            average: 0.0,
        };
    }

    let total: u32 = answers.iter().map(|a| u32::from(a.score)).sum();
    let max = answers.len() as u32 * u32::from(MAX_SCORE);
    let percentage = ((f64::from(total) / f64::from(max)) * 100.0).round() as u8;
    let average = f64::from(total) / answers.len() as f64;

    AssessmentScore {
        total,
        max,
        percentage: percentage.min(100),
        average,
    }
}

/// Computes the emotion split, wellness bucket and per-category averages.
pub fn calculate_analytics(answers: &[Answer]) -> AssessmentAnalytics {
    let score = score_answers(answers);

    let mut by_category: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for answer in answers {
        let entry = by_category.entry(answer.category_key()).or_insert((0, 0));
        entry.0 += u32::from(answer.score);
        entry.1 += 1;
    }

    let category_scores = by_category
        .into_iter()
        .map(|(category, (sum, count))| CategoryScore {
            category,
            average: round_to_tenth(f64::from(sum) / f64::from(count)),
            answered: count,
        })
        .collect();

    AssessmentAnalytics {
        average_score: round_to_tenth(score.average),
        emotions: emotions_for_average(score.average),
        wellness_level: WellnessLevel::from_percentage(score.percentage),
        category_scores,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
