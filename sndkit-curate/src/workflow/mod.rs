//! Curation workflow
//!
//! Two stages run over the sample tree, in a fixed order:
//! - **Filter**: delete files missing required substrings or tags, then keep
//!   the best ranked file per note name in each directory
//! - **Manifest**: write one manifest per directory (the root excluded)
//!
//! When both run in one pipeline, the filter stage hands its survivors to
//! the manifest stage directly instead of the tree being listed again.

pub mod filter_stage;
pub mod manifest_stage;
pub mod pipeline;
pub mod report;

use std::fmt;
use std::path::PathBuf;

pub use pipeline::Pipeline;
pub use report::{DirectoryReport, ManifestReport, ManifestStatus, RunSummary};

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Filter,
    Manifest,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Filter => f.write_str("filter"),
            Stage::Manifest => f.write_str("manifest"),
        }
    }
}

/// Filter stage result for one directory, handed to the manifest stage
#[derive(Debug, Clone)]
pub struct DirectoryOutcome {
    pub directory: PathBuf,
    /// Winning file names, sorted
    pub survivors: Vec<String>,
    pub report: DirectoryReport,
}
