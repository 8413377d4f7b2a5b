//! Service modules for sample curation
//!
//! Each service handles one step of the filter or manifest stage; the
//! workflow module wires them together.

pub mod best_file_selector;
pub mod directory_walker;
pub mod file_classifier;
pub mod file_remover;
pub mod manifest_builder;

pub use best_file_selector::{BestFileRegistry, Selection};
pub use directory_walker::{DirectoryWalker, WalkError};
pub use file_classifier::{Candidate, Classification, FileClassifier};
pub use file_remover::{DiskRemover, DryRunRemover, FileRemover, RemovalReason};
pub use manifest_builder::{BuiltManifest, Manifest, ManifestBuilder, ManifestMetadata};
