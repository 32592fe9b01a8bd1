//! Detect, map and mask in one call

use crate::detector::{DetectorConfig, Entity, EntityDetector, PIIDetector};
use crate::error::Result;
use crate::masker::mask_text;
use crate::recognizer::{RecognizerConfig, build_recognizer};
use crate::token_map::{TokenMap, build_token_map};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Masked text plus the map needed to restore it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub masked_text: String,
    pub pii_map: TokenMap,
}

impl ProcessResult {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the result as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json(true)?)?;
        info!("Saved processing result to {}", path.display());
        Ok(())
    }
}

/// The detection and masking pipeline
///
/// Holds one detector (and through it one recognizer) for its whole lifetime;
/// calls share no mutable state.
pub struct PiiMasker {
    detector: Box<dyn PIIDetector>,
}

impl PiiMasker {
    pub fn new(detector: impl PIIDetector + 'static) -> Self {
        Self {
            detector: Box::new(detector),
        }
    }

    /// Build the pipeline from configuration
    ///
    /// The recognizer is loaded here; if it cannot be, construction fails.
    pub fn from_config(detector: DetectorConfig, recognizer: &RecognizerConfig) -> Result<Self> {
        let detector = if detector.detect_names {
            EntityDetector::new(detector, build_recognizer(recognizer)?)?
        } else {
            EntityDetector::without_recognizer(detector)?
        };

        Ok(Self::new(detector))
    }

    /// Detected entities, sorted by start, overlaps not resolved
    pub fn detect(&self, text: &str) -> Result<Vec<Entity>> {
        self.detector.detect(text)
    }

    pub fn process(&self, text: &str) -> Result<ProcessResult> {
        info!("Starting PII detection and masking");

        let entities = resolve_overlaps(text, self.detector.detect(text)?);

        // Both stages number the same list, so markers and map keys agree
        let pii_map = build_token_map(&entities);
        let masked_text = mask_text(text, &entities)?;

        info!("PII masking completed with {} tokens", pii_map.len());
        Ok(ProcessResult {
            masked_text,
            pii_map,
        })
    }
}

/// Merge overlapping entities of a start-sorted list into covering spans
///
/// Each group of overlapping entities becomes one entity spanning all of them,
/// so every detected byte stays masked. The group takes the label and
/// confidence of its longest member; on equal lengths the one discovered first.
pub fn resolve_overlaps(text: &str, entities: Vec<Entity>) -> Vec<Entity> {
    let mut resolved: Vec<Entity> = Vec::with_capacity(entities.len());
    let mut group: Option<(usize, usize, Entity)> = None;

    for entity in entities {
        match group.as_mut() {
            Some((_, end, dominant)) if entity.start < *end => {
                warn!(
                    "Merging {} at [{}, {}) into overlapping {} ending at {}",
                    entity.label, entity.start, entity.end, dominant.label, end
                );
                *end = (*end).max(entity.end);
                if entity.len() > dominant.len() {
                    *dominant = entity;
                }
            }
            _ => {
                if let Some(finished) = group.take() {
                    resolved.push(covering_entity(text, finished));
                }
                group = Some((entity.start, entity.end, entity));
            }
        }
    }

    if let Some(finished) = group {
        resolved.push(covering_entity(text, finished));
    }

    resolved
}

fn covering_entity(text: &str, (start, end, dominant): (usize, usize, Entity)) -> Entity {
    if dominant.start == start && dominant.end == end {
        return dominant;
    }

    Entity {
        value: text.get(start..end).unwrap_or_default().to_string(),
        label: dominant.label,
        start,
        end,
        confidence: dominant.confidence,
    }
}
