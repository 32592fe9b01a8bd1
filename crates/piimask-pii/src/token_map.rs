//! Token map generation

use crate::detector::{Entity, PiiLabel};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token identifier for the n-th entity (1-indexed)
pub fn token_id(n: usize) -> String {
    format!("__TOKEN_{}__", n)
}

/// What a token stands for; offsets are not kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub value: String,
    pub label: PiiLabel,
    pub confidence: f32,
}

/// Token id to original value, in token order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenMap(IndexMap<String, TokenRecord>);

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &str) -> Option<&TokenRecord> {
        self.0.get(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenRecord)> {
        self.0.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a TokenMap {
    type Item = (&'a String, &'a TokenRecord);
    type IntoIter = indexmap::map::Iter<'a, String, TokenRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a token map from entities in the order given
///
/// The list is not re-sorted; the i-th entity gets `__TOKEN_<i>__`, matching the
/// markers written by [`crate::masker::mask_text`] for the same list.
pub fn build_token_map(entities: &[Entity]) -> TokenMap {
    let map: IndexMap<String, TokenRecord> = entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            (
                token_id(index + 1),
                TokenRecord {
                    value: entity.value.clone(),
                    label: entity.label.clone(),
                    confidence: entity.confidence,
                },
            )
        })
        .collect();

    debug!("Generated token map with {} entries", map.len());
    TokenMap(map)
}
