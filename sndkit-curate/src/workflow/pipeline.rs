//! Pipeline orchestrator
//!
//! Runs an ordered list of stages over the whole tree, stage by stage: every
//! directory is filtered before any manifest is written.
//!
//! # Error Handling
//! - A missing or unreadable root aborts the run
//! - An unreadable directory is counted as a failure and skipped
//! - Per-file failures are counted in the directory report
//!
//! # Example
//! ```rust,ignore
//! let mut pipeline = Pipeline::standard(config, Box::new(DiskRemover))?;
//! let summary = pipeline.run()?;
//! ```

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sndkit_common::text::instrument_label;
use sndkit_common::CurateConfig;

use super::filter_stage::filter_directory;
use super::manifest_stage::manifest_directory;
use super::report::{DirectoryReport, ManifestReport, ManifestStatus, RunSummary};
use super::{DirectoryOutcome, Stage};
use crate::error::{CurateError, CurateResult};
use crate::services::{DirectoryWalker, FileClassifier, FileRemover, ManifestBuilder, ManifestMetadata};

/// Ordered curation pipeline
pub struct Pipeline {
    config: CurateConfig,
    stages: Vec<Stage>,
    walker: DirectoryWalker,
    classifier: FileClassifier,
    builder: ManifestBuilder,
    remover: Box<dyn FileRemover>,
}

impl Pipeline {
    /// Create pipeline running `stages` in order
    ///
    /// Rejects an empty stage list, a repeated stage, and a manifest stage
    /// placed before the filter stage.
    pub fn new(
        config: CurateConfig,
        stages: Vec<Stage>,
        remover: Box<dyn FileRemover>,
    ) -> CurateResult<Self> {
        validate_stages(&stages)?;
        config.validate()?;

        Ok(Self {
            walker: DirectoryWalker::new(config.extension.clone(), config.ignore_patterns.clone()),
            classifier: FileClassifier::from_config(&config),
            builder: ManifestBuilder::new(config.manifest.file_name.clone()),
            config,
            stages,
            remover,
        })
    }

    /// Filter, then manifest
    pub fn standard(config: CurateConfig, remover: Box<dyn FileRemover>) -> CurateResult<Self> {
        Self::new(config, vec![Stage::Filter, Stage::Manifest], remover)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_dry_run(&self) -> bool {
        self.remover.is_dry_run()
    }

    /// Run every stage over the tree
    pub fn run(&mut self) -> CurateResult<RunSummary> {
        let root = self.config.root_folder.clone();
        let directories = self.walker.directories(&root)?;
        tracing::info!(
            root = %root.display(),
            directories = directories.len(),
            dry_run = self.is_dry_run(),
            "Pipeline starting"
        );

        let mut summary = RunSummary::default();
        let mut handoff: Option<Vec<DirectoryOutcome>> = None;

        for stage in self.stages.clone() {
            tracing::info!(stage = %stage, "Stage starting");
            match stage {
                Stage::Filter => {
                    let (outcomes, reports) = self.run_filter(&directories);
                    summary.filtered = reports;
                    handoff = Some(outcomes);
                }
                Stage::Manifest => {
                    summary.manifests = self.run_manifests(&root, &directories, handoff.as_deref());
                }
            }
        }

        summary.log();
        Ok(summary)
    }

    fn run_filter(&mut self, directories: &[PathBuf]) -> (Vec<DirectoryOutcome>, Vec<DirectoryReport>) {
        let mut outcomes = Vec::new();
        let mut reports = Vec::new();

        for directory in directories {
            let files = match self.walker.list_samples(directory) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!("Skipping directory: {}", e);
                    let mut report = DirectoryReport::new(directory.clone());
                    report.failed += 1;
                    reports.push(report);
                    continue;
                }
            };

            let outcome = filter_directory(directory, &files, &self.classifier, self.remover.as_mut());
            outcome.report.log();
            reports.push(outcome.report.clone());
            outcomes.push(outcome);
        }

        (outcomes, reports)
    }

    fn run_manifests(
        &self,
        root: &Path,
        directories: &[PathBuf],
        handoff: Option<&[DirectoryOutcome]>,
    ) -> Vec<ManifestReport> {
        let survivors: Option<HashMap<&Path, &[String]>> = handoff.map(|outcomes| {
            outcomes
                .iter()
                .map(|o| (o.directory.as_path(), o.survivors.as_slice()))
                .collect()
        });

        let mut reports = Vec::new();
        for directory in directories.iter().filter(|d| d.as_path() != root) {
            let metadata = ManifestMetadata {
                instrument: instrument_label(root, directory).unwrap_or_default(),
                organization: self.config.manifest.organization.clone(),
                performer: self.config.manifest.performer.clone(),
            };

            let handed = survivors.as_ref().and_then(|m| m.get(directory.as_path()).copied());
            let report = match handed {
                Some(files) => manifest_directory(&self.builder, directory, metadata, files, self.is_dry_run()),
                None => match self.walker.list_samples(directory) {
                    Ok(files) => manifest_directory(&self.builder, directory, metadata, &files, self.is_dry_run()),
                    Err(e) => {
                        tracing::warn!("Skipping directory: {}", e);
                        ManifestReport {
                            directory: directory.clone(),
                            entries: 0,
                            skipped_no_note: 0,
                            status: ManifestStatus::Failed { message: e.to_string() },
                        }
                    }
                },
            };
            reports.push(report);
        }
        reports
    }
}

fn validate_stages(stages: &[Stage]) -> CurateResult<()> {
    if stages.is_empty() {
        return Err(CurateError::InvalidPipeline("no stages".to_string()));
    }

    let mut seen = HashSet::new();
    for stage in stages {
        if !seen.insert(*stage) {
            return Err(CurateError::InvalidPipeline(format!("stage {} listed twice", stage)));
        }
    }

    let filter = stages.iter().position(|s| *s == Stage::Filter);
    let manifest = stages.iter().position(|s| *s == Stage::Manifest);
    if let (Some(f), Some(m)) = (filter, manifest) {
        if m < f {
            return Err(CurateError::InvalidPipeline(
                "manifest stage must run after filter stage".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DryRunRemover;

    #[test]
    fn test_stage_order_validated() {
        let remover = || Box::new(DryRunRemover::new()) as Box<dyn FileRemover>;
        let config = CurateConfig::default();

        assert!(Pipeline::new(config.clone(), vec![], remover()).is_err());
        assert!(Pipeline::new(config.clone(), vec![Stage::Manifest, Stage::Filter], remover()).is_err());
        assert!(Pipeline::new(config.clone(), vec![Stage::Filter, Stage::Filter], remover()).is_err());
        assert!(Pipeline::new(config.clone(), vec![Stage::Manifest], remover()).is_ok());

        let pipeline = Pipeline::standard(config, remover()).unwrap();
        assert_eq!(pipeline.stages(), &[Stage::Filter, Stage::Manifest]);
        assert!(pipeline.is_dry_run());
    }
}
