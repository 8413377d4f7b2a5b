//! Note-name extraction
//!
//! A note name is one word character, an optional flat (`b`) or sharp (`s`)
//! marker, then one digit (`C4`, `Bb3`, `Fs2`). The leftmost match in the
//! filename is the canonical key.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

static NOTE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w[bs]?\d").expect("note pattern is a valid regex"));

/// Note extraction failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// Filename contains no note token
    #[error("No note name found in {0:?}")]
    NoMatch(String),
}

/// Canonical pitch identifier extracted from a filename
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteName(String);

impl NoteName {
    /// Extract the first note token from `filename`
    pub fn extract(filename: &str) -> Result<Self, NoteError> {
        NOTE_PATTERN
            .find(filename)
            .map(|m| NoteName(m.as_str().to_string()))
            .ok_or_else(|| NoteError::NoMatch(filename.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_note() {
        assert_eq!(NoteName::extract("A4_normal_forte.mp3").unwrap().as_str(), "A4");
    }

    #[test]
    fn test_extract_flat_and_sharp() {
        assert_eq!(
            NoteName::extract("trumpet_Bb3_15_forte_normal.mp3").unwrap().as_str(),
            "Bb3"
        );
        assert_eq!(
            NoteName::extract("flute_Fs5_1_piano_normal.mp3").unwrap().as_str(),
            "Fs5"
        );
    }

    #[test]
    fn test_extract_after_instrument_prefix() {
        // "oboe" never forms a note token, so the first match is the pitch
        assert_eq!(NoteName::extract("oboe_normal_C4.mp3").unwrap().as_str(), "C4");
    }

    #[test]
    fn test_extract_leftmost_wins() {
        assert_eq!(NoteName::extract("x_D2_E5.mp3").unwrap().as_str(), "D2");
    }

    #[test]
    fn test_no_match_is_error() {
        let err = NoteName::extract("readme.mp").unwrap_err();
        assert_eq!(err, NoteError::NoMatch("readme.mp".to_string()));
    }
}
