//! Sample file classification
//!
//! Runs the per-file checks of the filter stage in order:
//! 1. Every required substring present (otherwise rejected before tag parsing)
//! 2. A duration tag and a dynamic tag present (otherwise rejected)
//! 3. A note name present (otherwise skipped untouched)

use sndkit_common::{CurateConfig, NoteError, NoteName, PriorityTable, TagMatch, TagRejection};

/// A file eligible for best-file selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub file_name: String,
    pub note: NoteName,
    pub tags: TagMatch,
}

impl Candidate {
    /// Comparison key; lexicographically smaller is better
    pub fn rank(&self) -> (usize, usize) {
        self.tags.rank()
    }
}

/// Outcome of classifying one sample file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// File lacks this required substring
    MissingRequired(String),
    /// File lacks a duration or dynamic tag
    MissingTag(TagRejection),
    /// File is tagged but carries no recognizable note token
    NoNote(NoteError),
    Candidate(Candidate),
}

/// Classifies sample filenames against the configured rules
pub struct FileClassifier {
    required: Vec<String>,
    priority: PriorityTable,
}

impl FileClassifier {
    pub fn new(required: Vec<String>, priority: PriorityTable) -> Self {
        Self { required, priority }
    }

    pub fn from_config(config: &CurateConfig) -> Self {
        Self::new(config.required_substrings.clone(), config.priority.clone())
    }

    pub fn classify(&self, file_name: &str) -> Classification {
        if let Some(missing) = self.required.iter().find(|r| !file_name.contains(r.as_str())) {
            return Classification::MissingRequired(missing.clone());
        }

        let tags = match self.priority.match_tags(file_name) {
            Ok(tags) => tags,
            Err(rejection) => return Classification::MissingTag(rejection),
        };

        match NoteName::extract(file_name) {
            Ok(note) => Classification::Candidate(Candidate {
                file_name: file_name.to_string(),
                note,
                tags,
            }),
            Err(e) => Classification::NoNote(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> FileClassifier {
        FileClassifier::from_config(&CurateConfig::default())
    }

    #[test]
    fn test_missing_required_checked_before_tags() {
        // Best possible tags, but no "normal"
        assert_eq!(
            classifier().classify("violin_A4_15_forte_arco-glissando.mp3"),
            Classification::MissingRequired("normal".to_string())
        );
    }

    #[test]
    fn test_untagged_file_rejected() {
        assert_eq!(
            classifier().classify("oboe_normal_C4.mp3"),
            Classification::MissingTag(TagRejection::MissingDuration)
        );
    }

    #[test]
    fn test_missing_note_reported() {
        // Default duration tags always contain "_<digit>", which reads as a
        // note token, so use digit-free tags here
        let classifier = FileClassifier::new(
            vec![],
            PriorityTable::new(vec!["_long_".into()], vec!["_loud_".into()]).unwrap(),
        );
        assert!(matches!(
            classifier.classify("noise_long_loud_.wav"),
            Classification::NoNote(_)
        ));
    }

    #[test]
    fn test_candidate() {
        match classifier().classify("flute_Bb4_05_fortissimo_normal.mp3") {
            Classification::Candidate(c) => {
                assert_eq!(c.note.as_str(), "Bb4");
                assert_eq!(c.rank(), (2, 3));
            }
            other => panic!("Expected candidate, got {:?}", other),
        }
    }
}
