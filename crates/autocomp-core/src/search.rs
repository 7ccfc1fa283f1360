//! Component discovery on disk.

use std::collections::BTreeSet;
use std::path::Path;

use autocomp_fs::NormalizedPath;
use walkdir::{DirEntry, WalkDir};

use crate::Result;
use crate::config::ResolvedOptions;

/// Find every file matched by the resolved globs.
///
/// Results are absolute, sorted and deduplicated. Directories and anything
/// under a `node_modules` folder are skipped.
pub fn search_components(options: &ResolvedOptions) -> Result<Vec<NormalizedPath>> {
    let mut bases: Vec<&str> = options.globs.iter().map(|g| literal_base(g)).collect();
    bases.sort_unstable();
    bases.dedup();
    // A base nested under another base is already covered by its walk.
    let mut roots: Vec<&str> = Vec::new();
    for base in bases {
        if !roots.iter().any(|r| is_within(base, r)) {
            roots.push(base);
        }
    }

    let mut files = BTreeSet::new();
    for base in roots {
        if !Path::new(base).is_dir() {
            continue;
        }
        for entry in WalkDir::new(base)
            .into_iter()
            .filter_entry(|e| !is_node_modules(e))
        {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    let path = NormalizedPath::new(entry.path());
                    if options.matches_globs(&path) {
                        files.insert(path);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = ?e.path(), error = %e, "Skipping unreadable path");
                }
            }
        }
    }

    tracing::debug!(count = files.len(), globs = ?options.globs, "Searched for components");
    Ok(files.into_iter().collect())
}

/// Leading directory of `pattern` made only of literal segments.
fn literal_base(pattern: &str) -> &str {
    let magic = pattern
        .find(|c| matches!(c, '*' | '?' | '[' | '{'))
        .unwrap_or(pattern.len());
    match pattern[..magic].rfind('/') {
        Some(0) => "/",
        Some(slash) => &pattern[..slash],
        None => ".",
    }
}

fn is_within(path: &str, dir: &str) -> bool {
    dir == "/"
        || path == dir
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn is_node_modules(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == "node_modules"
}
