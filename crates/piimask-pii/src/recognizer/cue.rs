//! Rule-based person-name recognizer

use crate::error::Result;
use crate::recognizer::{EntityRecognizer, RecognizedSpan};
use regex::Regex;

/// Cue phrases are matched case-insensitively; the name itself must be one or
/// more whole capitalized words, which may carry inner capitals, apostrophes
/// or hyphens (`McDonald`, `O'Brien`, `Jean-Luc`).
const CUE_PATTERN: &str = r"(?:(?i:\b(?:my name is|i am|i['’]m|call me|called))[ \t]+|\b(?:Mr|Mrs|Ms|Dr)\.?[ \t]+)(?P<name>\p{Lu}[\p{L}'’-]*\p{Ll}\b(?:[ \t]\p{Lu}[\p{L}'’-]*\p{Ll}\b)*)";

/// Recognizes capitalized names introduced by cue phrases
///
/// "My name is Ada Lovelace" yields `Ada Lovelace`; "Dr. Okafor" yields `Okafor`.
pub struct CueRecognizer {
    regex: Regex,
}

impl CueRecognizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: Regex::new(CUE_PATTERN)?,
        })
    }
}

impl EntityRecognizer for CueRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        Ok(self
            .regex
            .captures_iter(text)
            .filter_map(|captures| captures.name("name"))
            .map(|name| RecognizedSpan::person(name.as_str(), name.start(), name.end()))
            .collect())
    }

    fn name(&self) -> &str {
        "cue"
    }
}
