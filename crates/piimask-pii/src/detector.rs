//! PII detectors

mod entity_detector;

pub use entity_detector::EntityDetector;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence attached to recognizer-backed person names
pub const NAME_CONFIDENCE: f32 = 0.95;

/// Confidence attached to email pattern matches
pub const EMAIL_CONFIDENCE: f32 = 0.99;

/// Confidence attached to API key pattern matches
pub const API_KEY_CONFIDENCE: f32 = 0.97;

/// Email addresses: local part, `@`, domain, dot, top-level label of 2+ letters
pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";

/// Stripe-style test secret keys
pub const API_KEY_PATTERN: &str = r"\bsk_test_[A-Za-z0-9]+\b";

/// PII detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The detected text, always `text[start..end]`
    pub value: String,

    /// Category of PII detected
    pub label: PiiLabel,

    /// Start byte offset in the text
    pub start: usize,

    /// End byte offset in the text (exclusive)
    pub end: usize,

    /// Fixed per-label confidence (0.0 to 1.0)
    pub confidence: f32,
}

impl Entity {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Labels attached to detected PII
///
/// Serialized as the upper-case label string (`"NAME"`, `"EMAIL"`, `"API_KEY"`),
/// custom labels as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PiiLabel {
    /// Person name
    Name,

    /// Email address
    Email,

    /// API key
    ApiKey,

    /// Label coming from a configured custom pattern
    Custom(String),
}

impl PiiLabel {
    pub fn as_str(&self) -> &str {
        match self {
            PiiLabel::Name => "NAME",
            PiiLabel::Email => "EMAIL",
            PiiLabel::ApiKey => "API_KEY",
            PiiLabel::Custom(label) => label,
        }
    }
}

impl fmt::Display for PiiLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PiiLabel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "NAME" => PiiLabel::Name,
            "EMAIL" => PiiLabel::Email,
            "API_KEY" => PiiLabel::ApiKey,
            _ => PiiLabel::Custom(label),
        }
    }
}

impl From<&str> for PiiLabel {
    fn from(label: &str) -> Self {
        PiiLabel::from(label.to_string())
    }
}

impl From<PiiLabel> for String {
    fn from(label: PiiLabel) -> Self {
        match label {
            PiiLabel::Custom(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

/// Trait for detecting PII in text
pub trait PIIDetector: Send + Sync {
    /// Detect PII in the given text, sorted by start offset
    fn detect(&self, text: &str) -> Result<Vec<Entity>>;

    /// Get the labels this detector can emit
    fn supported_labels(&self) -> Vec<PiiLabel>;
}

/// Per-label confidence scores
///
/// These are policy constants, not model probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub name: f32,
    pub email: f32,
    pub api_key: f32,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            name: NAME_CONFIDENCE,
            email: EMAIL_CONFIDENCE,
            api_key: API_KEY_CONFIDENCE,
        }
    }
}

/// Configuration for a PII detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Enable person-name detection through the recognizer
    pub detect_names: bool,

    /// Enable email detection
    pub detect_email: bool,

    /// Enable API key detection
    pub detect_api_key: bool,

    /// Confidence scores for the built-in labels
    pub confidence: ConfidencePolicy,

    /// Custom regex patterns to detect
    pub custom_patterns: Vec<CustomPattern>,

    /// Minimum confidence threshold
    pub min_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            detect_names: true,
            detect_email: true,
            detect_api_key: true,
            confidence: ConfidencePolicy::default(),
            custom_patterns: Vec::new(),
            min_confidence: 0.0,
        }
    }
}

impl DetectorConfig {
    /// Validate confidence scores and custom labels
    pub fn validate(&self) -> Result<()> {
        let scores = [
            ("confidence.name", self.confidence.name),
            ("confidence.email", self.confidence.email),
            ("confidence.api_key", self.confidence.api_key),
            ("min_confidence", self.min_confidence),
        ];
        for (field, score) in scores {
            check_score(field, score)?;
        }

        for custom in &self.custom_patterns {
            if custom.label.is_empty() {
                return Err(Error::Config("custom pattern label must not be empty".to_string()));
            }

            // Labels are spliced into `[LABEL:__TOKEN_n__]` markers
            if custom.label.contains(['[', ']', ':']) || custom.label.contains(char::is_whitespace)
            {
                return Err(Error::Config(format!(
                    "custom pattern label {:?} must not contain brackets, colons or whitespace",
                    custom.label
                )));
            }

            check_score(&format!("confidence of {}", custom.label), custom.confidence)?;
        }

        Ok(())
    }

    /// Pattern rules in scan order: email, API key, then custom patterns
    pub fn pattern_rules(&self) -> Vec<PatternRule> {
        let mut rules = Vec::new();

        if self.detect_email {
            rules.push(PatternRule {
                label: PiiLabel::Email,
                pattern: EMAIL_PATTERN.to_string(),
                confidence: self.confidence.email,
            });
        }

        if self.detect_api_key {
            rules.push(PatternRule {
                label: PiiLabel::ApiKey,
                pattern: API_KEY_PATTERN.to_string(),
                confidence: self.confidence.api_key,
            });
        }

        rules.extend(self.custom_patterns.iter().map(|custom| PatternRule {
            label: PiiLabel::from(custom.label.clone()),
            pattern: custom.pattern.clone(),
            confidence: custom.confidence,
        }));

        rules
    }
}

fn check_score(field: &str, score: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(Error::Config(format!(
            "{} must be between 0.0 and 1.0, got {}",
            field, score
        )));
    }
    Ok(())
}

/// Custom regex pattern for detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Label written into markers and the token map (e.g. `PHONE`)
    pub label: String,

    /// Regex pattern
    pub pattern: String,

    /// Confidence score for matches
    pub confidence: f32,
}

/// A label bound to the pattern that detects it and its fixed confidence
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRule {
    pub label: PiiLabel,
    pub pattern: String,
    pub confidence: f32,
}
