//! Keyword extraction, filtering and scoring

pub mod analyzer;
pub mod keywords;
pub mod relevance;
pub mod scorer;
pub mod suggestions;
