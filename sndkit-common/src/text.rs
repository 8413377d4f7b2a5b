//! Instrument label formatting

use std::path::{Component, Path};

/// Title-case `s`: a letter is upper-cased when it starts the string or
/// follows a non-letter, and lower-cased otherwise.
///
/// `"french horn"` becomes `"French Horn"`, `"brass/trumpet"` becomes
/// `"Brass/Trumpet"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

/// Instrument label for `directory`: its path below `root`, `/`-joined and
/// title-cased. Returns `None` for the root itself or a path outside it.
pub fn instrument_label(root: &Path, directory: &Path) -> Option<String> {
    let relative = directory.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        return None;
    }
    Some(title_case(&segments.join("/")))
}
