//! File removal
//!
//! Every deletion goes through a [`FileRemover`] together with its reason so
//! it can be logged, or only recorded when running in dry-run mode.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use sndkit_common::TagRejection;

/// Why a file is being removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalReason {
    /// Required substring absent from the name
    MissingRequired(String),
    /// Duration or dynamic tag absent
    MissingTag(TagRejection),
    /// Previous best replaced by a better ranked file
    Superseded { by: String },
    /// File lost against the current best
    Outranked { by: String },
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalReason::MissingRequired(s) => write!(f, "missing required substring {:?}", s),
            RemovalReason::MissingTag(rejection) => write!(f, "{}", rejection),
            RemovalReason::Superseded { by } => write!(f, "superseded by {}", by),
            RemovalReason::Outranked { by } => write!(f, "outranked by {}", by),
        }
    }
}

/// Removes files from the sample tree
pub trait FileRemover {
    fn remove(&mut self, path: &Path, reason: &RemovalReason) -> io::Result<()>;

    /// True when nothing is actually written to disk
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Deletes files from disk
#[derive(Debug, Default)]
pub struct DiskRemover;

impl FileRemover for DiskRemover {
    fn remove(&mut self, path: &Path, reason: &RemovalReason) -> io::Result<()> {
        std::fs::remove_file(path)?;
        tracing::info!(path = %path.display(), reason = %reason, "Deleted");
        Ok(())
    }
}

/// Records what would be deleted without touching the filesystem
#[derive(Debug, Default)]
pub struct DryRunRemover {
    planned: Vec<(PathBuf, RemovalReason)>,
}

impl DryRunRemover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planned(&self) -> &[(PathBuf, RemovalReason)] {
        &self.planned
    }
}

impl FileRemover for DryRunRemover {
    fn remove(&mut self, path: &Path, reason: &RemovalReason) -> io::Result<()> {
        tracing::info!(path = %path.display(), reason = %reason, "Would delete (dry run)");
        self.planned.push((path.to_path_buf(), reason.clone()));
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
