//! Error types for piimask

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Recognizer error: {0}")]
    Recognizer(String),

    #[error("Invalid span [{start}, {end}) for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Span starting at {start} overlaps previous span ending at {previous_end}")]
    OverlappingSpans { start: usize, previous_end: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
