//! Per-directory sample manifests
//!
//! A manifest maps note names to sample filenames and carries static
//! metadata. It is written as 2-space indented JSON:
//!
//! ```json
//! {
//!   "instrument": "Violin",
//!   "organization": "Philharmonia Orchestra",
//!   "performer": "",
//!   "soundFiles": {
//!     "A4": "violin_A4_15_forte_arco-normal.mp3"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sndkit_common::{Error, NoteName, Result};

/// Manifest file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub instrument: String,
    pub organization: String,
    pub performer: String,
    #[serde(rename = "soundFiles")]
    pub sound_files: BTreeMap<String, String>,
}

impl Manifest {
    /// Read a manifest back from disk
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Render as 2-space indented JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Static metadata placed in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestMetadata {
    pub instrument: String,
    pub organization: String,
    pub performer: String,
}

/// A built manifest plus the files that could not be keyed
#[derive(Debug, Clone)]
pub struct BuiltManifest {
    pub manifest: Manifest,
    /// Files without a note token; left out of the manifest
    pub skipped: Vec<String>,
}

/// Builds and writes manifests
pub struct ManifestBuilder {
    file_name: String,
}

impl ManifestBuilder {
    /// Create builder writing manifests named `file_name`
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Key `files` by note name
    ///
    /// Two files resolving to the same note name is an
    /// [`Error::ManifestConflict`]: it means the directory was not
    /// deduplicated, and picking one silently would hide that.
    pub fn build<I, S>(&self, directory: &Path, metadata: ManifestMetadata, files: I) -> Result<BuiltManifest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sound_files = BTreeMap::new();
        let mut skipped = Vec::new();

        for file in files {
            let file = file.as_ref();
            let note = match NoteName::extract(file) {
                Ok(note) => note,
                Err(e) => {
                    tracing::warn!(directory = %directory.display(), "Skipping file: {}", e);
                    skipped.push(file.to_string());
                    continue;
                }
            };

            match sound_files.entry(note.into_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(file.to_string());
                }
                Entry::Occupied(slot) => {
                    return Err(Error::ManifestConflict {
                        directory: directory.to_path_buf(),
                        note: slot.key().clone(),
                        first: slot.get().clone(),
                        second: file.to_string(),
                    });
                }
            }
        }

        Ok(BuiltManifest {
            manifest: Manifest {
                instrument: metadata.instrument,
                organization: metadata.organization,
                performer: metadata.performer,
                sound_files,
            },
            skipped,
        })
    }

    /// Path the manifest for `directory` is written to
    pub fn manifest_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.file_name)
    }

    /// Write `manifest` into `directory`, replacing any previous one
    pub fn write(&self, directory: &Path, manifest: &Manifest) -> Result<PathBuf> {
        let path = self.manifest_path(directory);
        std::fs::write(&path, manifest.to_json()?)?;
        tracing::debug!(path = %path.display(), entries = manifest.sound_files.len(), "Manifest written");
        Ok(path)
    }
}
