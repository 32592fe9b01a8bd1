//! Recognizer plus regex PII detector implementation

use crate::detector::{DetectorConfig, Entity, PIIDetector, PatternRule, PiiLabel};
use crate::error::{Error, Result};
use crate::recognizer::{EntityCategory, EntityRecognizer, RecognizedSpan};
use regex::Regex;
use std::sync::Arc;
use tracing::info;

/// Detector combining a named-entity recognizer (names) with pattern rules
pub struct EntityDetector {
    config: DetectorConfig,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    rules: Vec<(PatternRule, Arc<Regex>)>,
}

impl EntityDetector {
    /// Create a new detector with the given configuration and recognizer
    pub fn new(config: DetectorConfig, recognizer: Arc<dyn EntityRecognizer>) -> Result<Self> {
        let rules = compile_rules(&config)?;

        Ok(Self {
            config,
            recognizer: Some(recognizer),
            rules,
        })
    }

    /// Create a detector that only runs pattern rules
    ///
    /// Name detection is switched off in the stored config.
    pub fn without_recognizer(mut config: DetectorConfig) -> Result<Self> {
        config.detect_names = false;
        let rules = compile_rules(&config)?;

        Ok(Self {
            config,
            recognizer: None,
            rules,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    fn detect_names(&self, text: &str, entities: &mut Vec<Entity>) -> Result<()> {
        let Some(recognizer) = &self.recognizer else {
            return Ok(());
        };

        let confidence = self.config.confidence.name;
        for span in recognizer.recognize(text)? {
            if span.category != EntityCategory::Person {
                continue;
            }

            let entity = entity_from_span(text, &span, confidence)?;
            info!(
                "Found {} at [{}, {}) via {}",
                entity.label,
                entity.start,
                entity.end,
                recognizer.name()
            );
            entities.push(entity);
        }

        Ok(())
    }
}

fn compile_rules(config: &DetectorConfig) -> Result<Vec<(PatternRule, Arc<Regex>)>> {
    config.validate()?;

    config
        .pattern_rules()
        .into_iter()
        .map(|rule| {
            let regex = Regex::new(&rule.pattern)?;
            Ok((rule, Arc::new(regex)))
        })
        .collect()
}

/// Turn a recognizer span into a NAME entity, rejecting spans that do not
/// address `text`
fn entity_from_span(text: &str, span: &RecognizedSpan, confidence: f32) -> Result<Entity> {
    let invalid = Error::InvalidSpan {
        start: span.start,
        end: span.end,
        len: text.len(),
    };

    if span.start >= span.end
        || span.end > text.len()
        || !text.is_char_boundary(span.start)
        || !text.is_char_boundary(span.end)
    {
        return Err(invalid);
    }

    let value = &text[span.start..span.end];
    if value != span.text {
        return Err(Error::Recognizer(format!(
            "span text {:?} does not match text at [{}, {})",
            span.text, span.start, span.end
        )));
    }

    Ok(Entity {
        value: value.to_string(),
        label: PiiLabel::Name,
        start: span.start,
        end: span.end,
        confidence,
    })
}

impl PIIDetector for EntityDetector {
    fn detect(&self, text: &str) -> Result<Vec<Entity>> {
        info!("Detecting PII in text of {} bytes", text.len());

        let mut entities = Vec::new();

        // Recognizer-backed names first, then pattern rules in configured order
        if self.config.detect_names {
            self.detect_names(text, &mut entities)?;
        }

        for (rule, regex) in &self.rules {
            for capture in regex.find_iter(text) {
                if capture.is_empty() {
                    continue;
                }

                info!(
                    "Found {} at [{}, {})",
                    rule.label,
                    capture.start(),
                    capture.end()
                );
                entities.push(Entity {
                    value: capture.as_str().to_string(),
                    label: rule.label.clone(),
                    start: capture.start(),
                    end: capture.end(),
                    confidence: rule.confidence,
                });
            }
        }

        entities.retain(|entity| entity.confidence >= self.config.min_confidence);

        // Stable sort keeps discovery order for equal starts
        entities.sort_by_key(|entity| entity.start);

        Ok(entities)
    }

    fn supported_labels(&self) -> Vec<PiiLabel> {
        let mut labels = Vec::new();

        if self.config.detect_names && self.recognizer.is_some() {
            labels.push(PiiLabel::Name);
        }
        for (rule, _) in &self.rules {
            if !labels.contains(&rule.label) {
                labels.push(rule.label.clone());
            }
        }

        labels
    }
}
