//! Error types for sndkit-curate

use thiserror::Error;

use crate::services::WalkError;

/// Curation error type
#[derive(Debug, Error)]
pub enum CurateError {
    /// Tree could not be walked
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// Stage list rejected
    #[error("Invalid pipeline: {0}")]
    InvalidPipeline(String),

    /// sndkit-common error
    #[error(transparent)]
    Common(#[from] sndkit_common::Error),
}

/// Result type for curation operations
pub type CurateResult<T> = Result<T, CurateError>;
