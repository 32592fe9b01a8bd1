//! piimask PII detection and masking
//!
//! This crate turns free-form text into a masked text plus a reversible token map:
//! - Person-name detection through a pluggable named-entity recognizer
//! - Email, API key and custom pattern detection
//! - Sequential `__TOKEN_<n>__` token maps
//! - Position-accurate masking with `[LABEL:__TOKEN_<n>__]` markers

pub mod detector;
pub mod error;
pub mod masker;
pub mod pipeline;
pub mod recognizer;
pub mod token_map;

pub use detector::{
    API_KEY_CONFIDENCE, API_KEY_PATTERN, ConfidencePolicy, CustomPattern, DetectorConfig,
    EMAIL_CONFIDENCE, EMAIL_PATTERN, Entity, EntityDetector, NAME_CONFIDENCE, PIIDetector,
    PatternRule, PiiLabel,
};
pub use error::{Error, Result};
pub use masker::{mask_text, marker};
pub use pipeline::{PiiMasker, ProcessResult, resolve_overlaps};
pub use recognizer::{
    CompositeRecognizer, CueRecognizer, EntityCategory, EntityRecognizer, GazetteerRecognizer,
    RecognizedSpan, RecognizerConfig, build_recognizer,
};
pub use token_map::{TokenMap, TokenRecord, build_token_map, token_id};
