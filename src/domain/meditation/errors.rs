use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeditationError {
    #[error("Meditation not found: {0}")]
    NotFound(String),

    #[error("Unknown meditation category: {0}")]
    UnknownCategory(String),

    #[error("Meditation catalog is unreadable: {0}")]
    Catalog(String),
}
