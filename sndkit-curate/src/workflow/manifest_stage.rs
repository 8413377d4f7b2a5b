//! Manifest stage: one manifest per directory

use std::path::Path;

use sndkit_common::config::SingleDirectorySettings;
use sndkit_common::{CurateConfig, Error};

use super::report::{ManifestReport, ManifestStatus};
use crate::error::CurateResult;
use crate::services::{DirectoryWalker, ManifestBuilder, ManifestMetadata};

/// Build and (unless `dry_run`) write the manifest for `directory`
///
/// Conflicts and write failures are reported, not returned, so the caller
/// can move on to the next directory.
pub fn manifest_directory<S: AsRef<str>>(
    builder: &ManifestBuilder,
    directory: &Path,
    metadata: ManifestMetadata,
    files: &[S],
    dry_run: bool,
) -> ManifestReport {
    let built = match builder.build(directory, metadata, files) {
        Ok(built) => built,
        Err(e) => {
            let status = if matches!(e, Error::ManifestConflict { .. }) {
                tracing::error!(directory = %directory.display(), "Manifest not written: {}", e);
                ManifestStatus::Conflict { message: e.to_string() }
            } else {
                tracing::warn!(directory = %directory.display(), "Manifest build failed: {}", e);
                ManifestStatus::Failed { message: e.to_string() }
            };
            return ManifestReport {
                directory: directory.to_path_buf(),
                entries: 0,
                skipped_no_note: 0,
                status,
            };
        }
    };

    let entries = built.manifest.sound_files.len();
    let skipped_no_note = built.skipped.len();

    let status = if dry_run {
        let path = builder.manifest_path(directory);
        match built.manifest.to_json() {
            Ok(json) => {
                tracing::info!(path = %path.display(), entries, "Would write manifest (dry run)");
                tracing::debug!("{}", json);
                ManifestStatus::Rendered { path }
            }
            Err(e) => ManifestStatus::Failed { message: e.to_string() },
        }
    } else {
        match builder.write(directory, &built.manifest) {
            Ok(path) => {
                tracing::info!(path = %path.display(), entries, "Manifest written");
                ManifestStatus::Written { path }
            }
            Err(e) => {
                tracing::warn!(directory = %directory.display(), "Manifest write failed: {}", e);
                ManifestStatus::Failed { message: e.to_string() }
            }
        }
    };

    ManifestReport {
        directory: directory.to_path_buf(),
        entries,
        skipped_no_note,
        status,
    }
}

/// Write the manifest of one fixed directory with fixed metadata
///
/// Unlike the tree-wide stage, the instrument name is not derived from the
/// directory path.
pub fn single_directory(
    config: &CurateConfig,
    settings: &SingleDirectorySettings,
    dry_run: bool,
) -> CurateResult<ManifestReport> {
    let walker = DirectoryWalker::new(config.extension.clone(), config.ignore_patterns.clone());
    let builder = ManifestBuilder::new(config.manifest.file_name.clone());

    let directory = settings.directory.as_path();
    if !directory.is_dir() {
        return Err(Error::NotFound(format!("directory {}", directory.display())).into());
    }

    let files = walker.list_samples(directory)?;
    let metadata = ManifestMetadata {
        instrument: settings.instrument.clone(),
        organization: settings.organization.clone(),
        performer: settings.performer.clone(),
    };

    Ok(manifest_directory(&builder, directory, metadata, &files, dry_run))
}
