//! Static guided-meditation catalog.
//!
//! The library ships inside the binary as YAML and is parsed once on first
//! access. Entries are never modified at runtime.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::errors::MeditationError;

const CATALOG_YAML: &str = include_str!("catalog.yaml");

static CATALOG: Lazy<Result<Vec<Meditation>, String>> = Lazy::new(|| {
    let entries: Vec<Meditation> =
        serde_yaml::from_str(CATALOG_YAML).map_err(|e| e.to_string())?;
    Ok(entries)
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeditationCategory {
    Sleep,
    Anxiety,
    Focus,
    Stress,
    Gratitude,
    Breathing,
}

impl MeditationCategory {
    pub const ALL: [MeditationCategory; 6] = [
        MeditationCategory::Sleep,
        MeditationCategory::Anxiety,
        MeditationCategory::Focus,
        MeditationCategory::Stress,
        MeditationCategory::Gratitude,
        MeditationCategory::Breathing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeditationCategory::Sleep => "sleep",
            MeditationCategory::Anxiety => "anxiety",
            MeditationCategory::Focus => "focus",
            MeditationCategory::Stress => "stress",
            MeditationCategory::Gratitude => "gratitude",
            MeditationCategory::Breathing => "breathing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        MeditationCategory::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meditation {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: MeditationCategory,
    pub duration_minutes: u32,
    pub audio_url: String,
    pub instructor: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeditationFilter {
    pub category: Option<MeditationCategory>,
    pub max_minutes: Option<u32>,
}

impl MeditationFilter {
    fn matches(&self, meditation: &Meditation) -> bool {
        self.category.map_or(true, |c| meditation.category == c)
            && self
                .max_minutes
                .map_or(true, |max| meditation.duration_minutes <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: MeditationCategory,
    pub count: usize,
}

fn entries() -> Result<&'static [Meditation], MeditationError> {
    CATALOG
        .as_ref()
        .map(Vec::as_slice)
        .map_err(|e| MeditationError::Catalog(e.clone()))
}

/// Catalog entries matching the filter, in catalog order.
pub fn list_meditations(filter: MeditationFilter) -> Result<Vec<Meditation>, MeditationError> {
    Ok(entries()?
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect())
}

pub fn find_meditation(slug: &str) -> Result<Meditation, MeditationError> {
    entries()?
        .iter()
        .find(|m| m.slug == slug)
        .cloned()
        .ok_or_else(|| MeditationError::NotFound(slug.to_string()))
}

/// Every category with its entry count, including empty ones.
pub fn category_counts() -> Result<Vec<CategoryCount>, MeditationError> {
    let all = entries()?;
    Ok(MeditationCategory::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: all.iter().filter(|m| m.category == category).count(),
        })
        .collect())
}
