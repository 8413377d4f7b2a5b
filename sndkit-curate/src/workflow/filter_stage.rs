//! Filter stage: required-substring filter, tag check, best-file selection
//!
//! Deletions happen eagerly, file by file. A failed deletion is counted and
//! logged; the registry keeps the decision and processing continues.

use std::path::Path;

use super::report::DirectoryReport;
use super::DirectoryOutcome;
use crate::services::{
    BestFileRegistry, Classification, FileClassifier, FileRemover, RemovalReason, Selection,
};

/// Filter one directory whose sample files are `files`, in that order
pub fn filter_directory(
    directory: &Path,
    files: &[String],
    classifier: &FileClassifier,
    remover: &mut dyn FileRemover,
) -> DirectoryOutcome {
    let mut report = DirectoryReport::new(directory.to_path_buf());
    let mut registry = BestFileRegistry::new();

    for file_name in files {
        match classifier.classify(file_name) {
            Classification::MissingRequired(substring) => {
                let reason = RemovalReason::MissingRequired(substring);
                if remove(remover, directory, file_name, &reason, &mut report) {
                    report.deleted_missing_required += 1;
                }
            }
            Classification::MissingTag(rejection) => {
                let reason = RemovalReason::MissingTag(rejection);
                if remove(remover, directory, file_name, &reason, &mut report) {
                    report.deleted_missing_tag += 1;
                }
            }
            Classification::NoNote(e) => {
                tracing::warn!(directory = %directory.display(), "Skipping file: {}", e);
                report.skipped_no_note += 1;
            }
            Classification::Candidate(candidate) => {
                let challenger = candidate.file_name.clone();
                match registry.offer(candidate) {
                    Selection::Registered => {
                        tracing::debug!(file = %challenger, "Registered as best");
                    }
                    Selection::Replaced { superseded } => {
                        let reason = RemovalReason::Superseded { by: challenger };
                        if remove(remover, directory, &superseded.file_name, &reason, &mut report) {
                            report.deleted_superseded += 1;
                        }
                    }
                    Selection::Rejected { loser, incumbent } => {
                        let reason = RemovalReason::Outranked { by: incumbent };
                        if remove(remover, directory, &loser.file_name, &reason, &mut report) {
                            report.deleted_superseded += 1;
                        }
                    }
                }
            }
        }
    }

    let survivors: Vec<String> = registry
        .into_survivors()
        .into_iter()
        .map(|c| c.file_name)
        .collect();
    report.kept = survivors.len();

    DirectoryOutcome {
        directory: directory.to_path_buf(),
        survivors,
        report,
    }
}

fn remove(
    remover: &mut dyn FileRemover,
    directory: &Path,
    file_name: &str,
    reason: &RemovalReason,
    report: &mut DirectoryReport,
) -> bool {
    let path = directory.join(file_name);
    match remover.remove(&path, reason) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), reason = %reason, "Delete failed: {}", e);
            report.failed += 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{DiskRemover, DryRunRemover};
    use sndkit_common::{CurateConfig, PriorityTable};
    use std::io;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Remover whose every deletion is denied
    #[derive(Default)]
    struct DenyingRemover {
        attempts: Vec<PathBuf>,
    }

    impl FileRemover for DenyingRemover {
        fn remove(&mut self, path: &Path, _reason: &RemovalReason) -> io::Result<()> {
            self.attempts.push(path.to_path_buf());
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    fn names(files: &[&str]) -> Vec<String> {
        files.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_by_reason() {
        let classifier = FileClassifier::from_config(&CurateConfig::default());
        let mut remover = DryRunRemover::new();
        let files = names(&[
            "oboe_A4_15_forte_normal.mp3",
            "oboe_A4_1_forte_normal.mp3",
            "oboe_A4_15_forte_staccato.mp3",
            "oboe_normal_C4.mp3",
            "oboe_C5_05_piano_normal.mp3",
        ]);

        let outcome = filter_directory(Path::new("oboe"), &files, &classifier, &mut remover);

        assert_eq!(
            outcome.survivors,
            vec!["oboe_A4_15_forte_normal.mp3", "oboe_C5_05_piano_normal.mp3"]
        );
        assert_eq!(outcome.report.kept, 2);
        assert_eq!(outcome.report.deleted_superseded, 1);
        assert_eq!(outcome.report.deleted_missing_required, 1);
        assert_eq!(outcome.report.deleted_missing_tag, 1);
        assert_eq!(outcome.report.failed, 0);
        assert_eq!(remover.planned().len(), 3);
    }

    #[test]
    fn test_superseded_incumbent_is_the_removed_file() {
        let classifier = FileClassifier::from_config(&CurateConfig::default());
        let mut remover = DryRunRemover::new();
        let files = names(&["cello_C3_1_forte_normal.mp3", "cello_C3_15_piano_normal.mp3"]);

        let outcome = filter_directory(Path::new("cello"), &files, &classifier, &mut remover);

        assert_eq!(outcome.survivors, vec!["cello_C3_15_piano_normal.mp3"]);
        let (path, reason) = &remover.planned()[0];
        assert_eq!(path, &Path::new("cello").join("cello_C3_1_forte_normal.mp3"));
        assert_eq!(
            reason,
            &RemovalReason::Superseded {
                by: "cello_C3_15_piano_normal.mp3".to_string()
            }
        );
    }

    #[test]
    fn test_failed_deletions_counted_and_processing_continues() {
        let classifier = FileClassifier::from_config(&CurateConfig::default());
        let mut remover = DenyingRemover::default();
        let files = names(&[
            "bassoon_A4_1_forte_normal.mp3",
            "bassoon_A4_15_forte_normal.mp3",
            "bassoon_C4_15_forte_staccato.mp3",
            "bassoon_D4_15_forte_normal.mp3",
        ]);

        let outcome = filter_directory(Path::new("bassoon"), &files, &classifier, &mut remover);

        assert_eq!(
            outcome.survivors,
            vec!["bassoon_A4_15_forte_normal.mp3", "bassoon_D4_15_forte_normal.mp3"]
        );
        assert_eq!(outcome.report.failed, 2);
        assert_eq!(outcome.report.kept, 2);
        assert_eq!(outcome.report.deleted(), 0);
        assert_eq!(
            remover.attempts,
            vec![
                Path::new("bassoon").join("bassoon_A4_1_forte_normal.mp3"),
                Path::new("bassoon").join("bassoon_C4_15_forte_staccato.mp3"),
            ]
        );
    }

    #[test]
    fn test_file_without_note_left_on_disk() {
        let dir = TempDir::new().unwrap();
        let noise = dir.path().join("noise_long_loud_.wav");
        let kept = dir.path().join("gong_C2_long_loud_.wav");
        std::fs::write(&noise, b"RIFF").unwrap();
        std::fs::write(&kept, b"RIFF").unwrap();

        let classifier = FileClassifier::new(
            vec![],
            PriorityTable::new(vec!["_long_".into()], vec!["_loud_".into()]).unwrap(),
        );
        let files = names(&["gong_C2_long_loud_.wav", "noise_long_loud_.wav"]);
        let mut remover = DiskRemover;

        let outcome = filter_directory(dir.path(), &files, &classifier, &mut remover);

        assert!(noise.exists());
        assert!(kept.exists());
        assert_eq!(outcome.report.skipped_no_note, 1);
        assert_eq!(outcome.report.deleted(), 0);
        assert_eq!(outcome.survivors, vec!["gong_C2_long_loud_.wav"]);
    }
}
