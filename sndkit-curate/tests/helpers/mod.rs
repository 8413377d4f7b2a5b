//! Shared helpers for building sample trees

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use sndkit_common::CurateConfig;
use tempfile::TempDir;

/// Create `files` (paths relative to the returned root) as empty files
pub fn sample_tree(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"ID3").unwrap();
    }
    dir
}

/// Default configuration rooted at `root`
pub fn config_for(root: &Path) -> CurateConfig {
    CurateConfig {
        root_folder: root.to_path_buf(),
        ..CurateConfig::default()
    }
}

/// File names directly inside `directory`
pub fn file_names(directory: &Path) -> BTreeSet<String> {
    fs::read_dir(directory)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect()
}
