//! DTOs for meditation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::meditation::Meditation;

#[derive(Debug, Default, Deserialize)]
pub struct ListMeditationsParams {
    pub category: Option<String>,
    pub max_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MeditationListResponse {
    pub items: Vec<Meditation>,
    pub total: usize,
}

impl From<Vec<Meditation>> for MeditationListResponse {
    fn from(items: Vec<Meditation>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
