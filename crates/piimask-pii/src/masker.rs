//! Text masking

use crate::detector::{Entity, PiiLabel};
use crate::error::{Error, Result};
use crate::token_map::token_id;
use tracing::debug;

/// Inline marker for the n-th entity, e.g. `[EMAIL:__TOKEN_2__]`
pub fn marker(label: &PiiLabel, n: usize) -> String {
    format!("[{}:{}]", label, token_id(n))
}

/// Replace each entity span with its marker, copying everything else verbatim
///
/// Entities must be sorted by `start`, non-overlapping, and address valid
/// character boundaries of `text`; anything else is rejected rather than
/// producing a corrupted string.
pub fn mask_text(text: &str, entities: &[Entity]) -> Result<String> {
    if entities.is_empty() {
        return Ok(text.to_string());
    }

    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for (index, entity) in entities.iter().enumerate() {
        check_span(text, entity)?;

        if entity.start < last_end {
            return Err(Error::OverlappingSpans {
                start: entity.start,
                previous_end: last_end,
            });
        }

        // Add text before this entity
        result.push_str(&text[last_end..entity.start]);
        result.push_str(&marker(&entity.label, index + 1));

        last_end = entity.end;
    }

    // Add remaining text
    result.push_str(&text[last_end..]);

    debug!(
        "Masked {} entities ({} -> {} bytes)",
        entities.len(),
        text.len(),
        result.len()
    );
    Ok(result)
}

fn check_span(text: &str, entity: &Entity) -> Result<()> {
    if entity.start >= entity.end
        || entity.end > text.len()
        || !text.is_char_boundary(entity.start)
        || !text.is_char_boundary(entity.end)
    {
        return Err(Error::InvalidSpan {
            start: entity.start,
            end: entity.end,
            len: text.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests;
