//! # sndkit Common Library
//!
//! Shared code for the sndkit sample-curation tools including:
//! - Error type shared by every crate
//! - Configuration loading (TOML, environment, compiled defaults)
//! - Note-name extraction from sample filenames
//! - Duration/dynamic tag priority tables
//! - Instrument label formatting

pub mod config;
pub mod error;
pub mod note;
pub mod tags;
pub mod text;

pub use config::{ConfigSource, CurateConfig};
pub use error::{Error, Result};
pub use note::{NoteError, NoteName};
pub use tags::{PriorityTable, TagMatch, TagRejection};
