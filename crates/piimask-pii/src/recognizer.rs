//! Named-entity recognizers
//!
//! The detector only needs `recognize(text) -> spans`; anything that can produce
//! categorized spans (a statistical model, a rule set, a remote service) plugs in
//! behind [`EntityRecognizer`].

mod cue;
mod gazetteer;

pub use cue::CueRecognizer;
pub use gazetteer::GazetteerRecognizer;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Category assigned to a recognized span
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Person,
    Organization,
    Location,
    Other(String),
}

/// A span produced by a recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    /// The recognized text
    pub text: String,

    /// Category of the span
    pub category: EntityCategory,

    /// Start byte offset in the text
    pub start: usize,

    /// End byte offset in the text (exclusive)
    pub end: usize,
}

impl RecognizedSpan {
    pub fn person(text: &str, start: usize, end: usize) -> Self {
        Self {
            text: text.to_string(),
            category: EntityCategory::Person,
            start,
            end,
        }
    }
}

/// Trait for named-entity recognition backends
///
/// Implementations are built once, up front, and shared read-only across calls.
/// A backend that cannot be loaded must fail at construction.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in the given text
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Runs several recognizers and concatenates their spans in order
pub struct CompositeRecognizer {
    recognizers: Vec<Arc<dyn EntityRecognizer>>,
}

impl CompositeRecognizer {
    pub fn new(recognizers: Vec<Arc<dyn EntityRecognizer>>) -> Result<Self> {
        if recognizers.is_empty() {
            return Err(Error::Recognizer(
                "composite recognizer needs at least one backend".to_string(),
            ));
        }

        Ok(Self { recognizers })
    }
}

impl EntityRecognizer for CompositeRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        let mut spans = Vec::new();
        for recognizer in &self.recognizers {
            spans.extend(recognizer.recognize(text)?);
        }
        Ok(spans)
    }

    fn name(&self) -> &str {
        "composite"
    }
}

/// Recognizer selection, as written in configuration files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecognizerConfig {
    /// Known names matched verbatim
    Gazetteer {
        /// File with one name per line
        #[serde(default)]
        path: Option<PathBuf>,

        /// Inline names
        #[serde(default)]
        names: Vec<String>,

        /// Match ASCII letters regardless of case
        #[serde(default)]
        case_insensitive: bool,
    },

    /// Capitalized names following cue phrases such as "my name is"
    #[default]
    Cue,

    /// Several recognizers combined
    Composite { recognizers: Vec<RecognizerConfig> },
}

/// Build a recognizer from configuration, failing fast if it cannot be loaded
pub fn build_recognizer(config: &RecognizerConfig) -> Result<Arc<dyn EntityRecognizer>> {
    let recognizer: Arc<dyn EntityRecognizer> = match config {
        RecognizerConfig::Gazetteer {
            path,
            names,
            case_insensitive,
        } => {
            let mut all_names = names.clone();
            if let Some(path) = path {
                all_names.extend(gazetteer::read_names(path)?);
            }
            Arc::new(GazetteerRecognizer::from_names(all_names, *case_insensitive)?)
        }
        RecognizerConfig::Cue => Arc::new(CueRecognizer::new()?),
        RecognizerConfig::Composite { recognizers } => {
            let built = recognizers
                .iter()
                .map(build_recognizer)
                .collect::<Result<Vec<_>>>()?;
            Arc::new(CompositeRecognizer::new(built)?)
        }
    };

    info!("Loaded {} entity recognizer", recognizer.name());
    Ok(recognizer)
}

#[cfg(test)]
mod tests;
