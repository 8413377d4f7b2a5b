//! Duration and dynamic tag priority tables
//!
//! Each table is ordered from most preferred (rank 0) to least preferred.
//! A filename is matched against a table by vocabulary order, not by position
//! in the filename: when a name carries two duration tags, the one declared
//! first in the table is used.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::{Error, Result};

/// Default duration tags, longest sustain first
pub const DEFAULT_DURATIONS: [&str; 4] = ["_15_", "_1_", "_05_", "_025_"];

/// Default dynamic tags
pub const DEFAULT_DYNAMICS: [&str; 6] = [
    "_forte_",
    "_mezzo-forte_",
    "_mezzo-piano_",
    "_fortissimo_",
    "piano_",
    "_pianissimo_",
];

/// Why a filename could not be ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagRejection {
    #[error("missing duration tag")]
    MissingDuration,

    #[error("missing dynamic tag")]
    MissingDynamic,
}

/// Tags found in a filename together with their ranks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub duration: String,
    pub duration_rank: usize,
    pub dynamic: String,
    pub dynamic_rank: usize,
}

impl TagMatch {
    /// Comparison key; lexicographically smaller is better
    pub fn rank(&self) -> (usize, usize) {
        (self.duration_rank, self.dynamic_rank)
    }
}

/// Ordered duration and dynamic vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTable {
    #[serde(default = "default_durations")]
    pub durations: Vec<String>,

    #[serde(default = "default_dynamics")]
    pub dynamics: Vec<String>,
}

fn default_durations() -> Vec<String> {
    DEFAULT_DURATIONS.iter().map(|s| s.to_string()).collect()
}

fn default_dynamics() -> Vec<String> {
    DEFAULT_DYNAMICS.iter().map(|s| s.to_string()).collect()
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            durations: default_durations(),
            dynamics: default_dynamics(),
        }
    }
}

impl PriorityTable {
    pub fn new(durations: Vec<String>, dynamics: Vec<String>) -> Result<Self> {
        let table = Self { durations, dynamics };
        table.validate()?;
        Ok(table)
    }

    /// Reject empty tables and duplicate tags within one table
    pub fn validate(&self) -> Result<()> {
        check_vocabulary("duration", &self.durations)?;
        check_vocabulary("dynamic", &self.dynamics)
    }

    pub fn duration_rank(&self, tag: &str) -> Option<usize> {
        self.durations.iter().position(|t| t == tag)
    }

    pub fn dynamic_rank(&self, tag: &str) -> Option<usize> {
        self.dynamics.iter().position(|t| t == tag)
    }

    /// Find the first duration and dynamic tag (by table order) in `filename`
    pub fn match_tags(&self, filename: &str) -> std::result::Result<TagMatch, TagRejection> {
        let (duration_rank, duration) = first_contained(&self.durations, filename)
            .ok_or(TagRejection::MissingDuration)?;
        let (dynamic_rank, dynamic) = first_contained(&self.dynamics, filename)
            .ok_or(TagRejection::MissingDynamic)?;

        Ok(TagMatch {
            duration: duration.to_string(),
            duration_rank,
            dynamic: dynamic.to_string(),
            dynamic_rank,
        })
    }
}

fn first_contained<'a>(vocabulary: &'a [String], filename: &str) -> Option<(usize, &'a str)> {
    vocabulary
        .iter()
        .enumerate()
        .find(|(_, tag)| filename.contains(tag.as_str()))
        .map(|(rank, tag)| (rank, tag.as_str()))
}

fn check_vocabulary(kind: &str, tags: &[String]) -> Result<()> {
    if tags.is_empty() {
        return Err(Error::Config(format!("{} priority table is empty", kind)));
    }

    let mut seen = HashSet::new();
    for tag in tags {
        if tag.is_empty() {
            return Err(Error::Config(format!("{} priority table has an empty tag", kind)));
        }
        if !seen.insert(tag.as_str()) {
            return Err(Error::Config(format!(
                "{} priority table lists {:?} more than once",
                kind, tag
            )));
        }
    }
    Ok(())
}
