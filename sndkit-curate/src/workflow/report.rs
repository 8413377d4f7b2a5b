//! Per-directory and per-run reporting

use std::path::PathBuf;

/// Filter stage counters for one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub kept: usize,
    pub deleted_missing_required: usize,
    pub deleted_missing_tag: usize,
    pub deleted_superseded: usize,
    /// Tagged files without a note token, left untouched
    pub skipped_no_note: usize,
    /// Per-file filesystem failures (e.g. deletion denied)
    pub failed: usize,
}

impl DirectoryReport {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    pub fn deleted(&self) -> usize {
        self.deleted_missing_required + self.deleted_missing_tag + self.deleted_superseded
    }

    pub fn log(&self) {
        tracing::info!(
            directory = %self.directory.display(),
            kept = self.kept,
            deleted_missing_required = self.deleted_missing_required,
            deleted_missing_tag = self.deleted_missing_tag,
            deleted_superseded = self.deleted_superseded,
            skipped_no_note = self.skipped_no_note,
            failed = self.failed,
            "Directory filtered"
        );
    }
}

/// Manifest stage outcome for one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestStatus {
    Written { path: PathBuf },
    /// Dry run: rendered but not written
    Rendered { path: PathBuf },
    /// Two files claimed one note; nothing written
    Conflict { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestReport {
    pub directory: PathBuf,
    pub entries: usize,
    pub skipped_no_note: usize,
    pub status: ManifestStatus,
}

impl ManifestReport {
    pub fn is_ok(&self) -> bool {
        matches!(
            self.status,
            ManifestStatus::Written { .. } | ManifestStatus::Rendered { .. }
        )
    }
}

/// Aggregated results of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub filtered: Vec<DirectoryReport>,
    pub manifests: Vec<ManifestReport>,
}

impl RunSummary {
    /// No per-file failures and no manifest conflicts or failures
    pub fn is_clean(&self) -> bool {
        self.filtered.iter().all(|r| r.failed == 0) && self.manifests.iter().all(|m| m.is_ok())
    }

    pub fn total_deleted(&self) -> usize {
        self.filtered.iter().map(|r| r.deleted()).sum()
    }

    pub fn total_kept(&self) -> usize {
        self.filtered.iter().map(|r| r.kept).sum()
    }

    pub fn log(&self) {
        let conflicts = self
            .manifests
            .iter()
            .filter(|m| matches!(m.status, ManifestStatus::Conflict { .. }))
            .count();
        let failed_files: usize = self.filtered.iter().map(|r| r.failed).sum();

        tracing::info!(
            directories_filtered = self.filtered.len(),
            kept = self.total_kept(),
            deleted = self.total_deleted(),
            failed_files,
            manifests = self.manifests.iter().filter(|m| m.is_ok()).count(),
            conflicts,
            "Run complete"
        );
    }
}
