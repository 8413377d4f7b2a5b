//! Common error types for sndkit

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for sndkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across sndkit crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML configuration could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Manifest (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Two files in one directory resolve to the same note name
    #[error("Note {note} claimed by both {first} and {second} in {directory}")]
    ManifestConflict {
        directory: PathBuf,
        note: String,
        first: String,
        second: String,
    },

    /// Requested path not found
    #[error("Not found: {0}")]
    NotFound(String),
}
