//! Sample tree walker
//!
//! Visits the tree root and every subdirectory below it, then lists the
//! immediate sample files of each visited directory. Listings are sorted by
//! file name so repeated runs make the same decisions.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directory walker errors
#[derive(Debug, Error)]
pub enum WalkError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Cannot read a directory
    #[error("Directory access error {0}: {1}")]
    DirectoryAccessError(PathBuf, String),
}

/// Sample tree walker
pub struct DirectoryWalker {
    extension: String,
    ignore_patterns: Vec<String>,
}

impl DirectoryWalker {
    /// Create walker selecting files that end with `extension`
    pub fn new(extension: impl Into<String>, ignore_patterns: Vec<String>) -> Self {
        Self {
            extension: extension.into(),
            ignore_patterns,
        }
    }

    /// All directories of the tree, root first
    ///
    /// Symlinks are not followed. Unreadable subdirectories are logged and
    /// skipped; only a missing or non-directory root is an error.
    pub fn directories(&self, root: &Path) -> Result<Vec<PathBuf>, WalkError> {
        check_root(root)?;

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_visit(e));

        let mut directories = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        directories.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                }
            }
        }

        tracing::debug!(root = %root.display(), count = directories.len(), "Directories discovered");
        Ok(directories)
    }

    /// Sample file names directly inside `directory`, sorted
    pub fn list_samples(&self, directory: &Path) -> Result<Vec<String>, WalkError> {
        let entries = std::fs::read_dir(directory).map_err(|e| {
            WalkError::DirectoryAccessError(directory.to_path_buf(), e.to_string())
        })?;

        let mut samples = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(directory = %directory.display(), "Error reading entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) if name.ends_with(&self.extension) => samples.push(name),
                Ok(_) => {}
                Err(raw) => {
                    tracing::warn!(
                        directory = %directory.display(),
                        "Skipping non UTF-8 file name {:?}",
                        raw
                    );
                }
            }
        }

        samples.sort();
        Ok(samples)
    }

    fn should_visit(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !self.ignore_patterns.iter().any(|p| *p == name)
    }
}

fn check_root(root: &Path) -> Result<(), WalkError> {
    if !root.exists() {
        return Err(WalkError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}
