//! Gazetteer-based person-name recognizer

use crate::error::{Error, Result};
use crate::recognizer::{EntityRecognizer, RecognizedSpan};
use aho_corasick::{AhoCorasick, MatchKind};
use std::path::Path;
use tracing::debug;

/// Matches a fixed list of person names on word boundaries
///
/// At each start the longest name that sits on word boundaries wins, so a
/// longer entry that runs into the next word never hides a shorter one.
/// Spans contained in an earlier one are dropped; partial overlaps are kept.
pub struct GazetteerRecognizer {
    automaton: AhoCorasick,
    name_count: usize,
}

impl GazetteerRecognizer {
    /// Build a recognizer from a list of names
    ///
    /// Blank entries are ignored; an empty list is an error.
    pub fn from_names<I, S>(names: I, case_insensitive: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            return Err(Error::Recognizer("gazetteer contains no names".to_string()));
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(case_insensitive)
            .build(&names)
            .map_err(|e| Error::Recognizer(format!("Failed to build gazetteer: {}", e)))?;

        Ok(Self {
            automaton,
            name_count: names.len(),
        })
    }

    /// Build a recognizer from a file with one name per line
    pub fn from_file(path: impl AsRef<Path>, case_insensitive: bool) -> Result<Self> {
        Self::from_names(read_names(path.as_ref())?, case_insensitive)
    }

    pub fn name_count(&self) -> usize {
        self.name_count
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        let mut matches: Vec<(usize, usize)> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| on_word_boundaries(text, m.start(), m.end()))
            .map(|m| (m.start(), m.end()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut spans = Vec::new();
        let mut last_end = 0;
        for (start, end) in matches {
            if end <= last_end {
                continue;
            }
            spans.push(RecognizedSpan::person(&text[start..end], start, end));
            last_end = end;
        }

        debug!("Gazetteer recognized {} spans", spans.len());
        Ok(spans)
    }

    fn name(&self) -> &str {
        "gazetteer"
    }
}

/// Read names from a gazetteer file, skipping blank lines and `#` comments
pub(crate) fn read_names(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to read gazetteer {}: {}", path.display(), e),
        )
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
