//! sndkit-curate library interface
//!
//! Curates a tree of instrument note samples: deletes unusable and
//! superseded recordings, then writes a manifest per directory.

pub mod error;
pub mod services;
pub mod workflow;

pub use crate::error::{CurateError, CurateResult};
pub use crate::workflow::{Pipeline, RunSummary, Stage};
