//! Meditation module - the read-only guided meditation library.

mod catalog;
mod errors;

pub use catalog::{
    category_counts, find_meditation, list_meditations, CategoryCount, Meditation,
    MeditationCategory, MeditationFilter,
};
pub use errors::MeditationError;
