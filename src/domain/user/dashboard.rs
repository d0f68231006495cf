//! Read model for the personal dashboard.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::assessment::{AssessmentTrend, WellnessLevel};
use crate::domain::foundation::{AssessmentId, Timestamp};
use crate::domain::journal::Mood;

/// Headline numbers for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityCounts {
    pub assessments: u64,
    pub journal_entries: u64,
    pub chat_messages: u64,
    pub forum_posts: u64,
}

/// Compact view of the newest assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestAssessment {
    pub id: AssessmentId,
    pub percentage: u8,
    pub wellness_level: WellnessLevel,
    pub summary: String,
    pub created_at: Timestamp,
}

/// Count of journal entries per mood. Moods never logged are reported as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoodDistribution(BTreeMap<&'static str, u64>);

impl MoodDistribution {
    pub fn from_counts(counts: impl IntoIterator<Item = (Mood, u64)>) -> Self {
        let mut map: BTreeMap<&'static str, u64> =
            Mood::ALL.iter().map(|m| (m.as_str(), 0)).collect();
        for (mood, count) in counts {
            *map.entry(mood.as_str()).or_insert(0) += count;
        }
        Self(map)
    }

    pub fn get(&self, mood: Mood) -> u64 {
        self.0.get(mood.as_str()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub counts: ActivityCounts,
    pub latest_assessment: Option<LatestAssessment>,
    pub mood_distribution: MoodDistribution,
    pub trend: AssessmentTrend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_distribution_fills_missing_moods() {
        let dist = MoodDistribution::from_counts(vec![(Mood::Good, 3), (Mood::Low, 1)]);
        assert_eq!(dist.get(Mood::Good), 3);
        assert_eq!(dist.get(Mood::Awful), 0);
        assert_eq!(dist.total(), 4);

        let json = serde_json::to_value(&dist).unwrap();
        assert_eq!(json["great"], 0);
        assert_eq!(json["low"], 1);
    }
}
