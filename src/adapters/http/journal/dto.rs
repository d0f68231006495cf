//! HTTP DTOs for journal endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::journal::{JournalEntry, Mood};

/// Body for both create and full update.
#[derive(Debug, Clone, Deserialize)]
pub struct JournalEntryRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    /// Parsed by the handler so unknown moods produce a 400 with a field.
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJournalParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub mood: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntryResponse {
    pub id: String,
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<JournalEntry> for JournalEntryResponse {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            title: entry.title().map(str::to_string),
            content: entry.content().to_string(),
            mood: entry.mood(),
            tags: entry.tags().to_vec(),
            created_at: entry.created_at().to_rfc3339(),
            updated_at: entry.updated_at().to_rfc3339(),
        }
    }
}

/// Parses an optional mood string, treating blank as absent.
pub fn parse_mood(raw: Option<&str>) -> Result<Option<Mood>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Mood::parse(&s.to_lowercase())
            .map(Some)
            .ok_or_else(|| format!("Unknown mood '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_optional_fields() {
        let req: JournalEntryRequest = serde_json::from_str(r#"{"content":"today"}"#).unwrap();
        assert!(req.title.is_none());
        assert!(req.mood.is_none());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn mood_parsing() {
        assert_eq!(parse_mood(None), Ok(None));
        assert_eq!(parse_mood(Some("  ")), Ok(None));
        assert_eq!(parse_mood(Some("Good")), Ok(Some(Mood::Good)));
        assert!(parse_mood(Some("ecstatic")).is_err());
    }
}
