//! Project file enumeration. Paths are returned relative to the base
//! directory with forward-slash separators on every OS; ordering follows the
//! filesystem and is not guaranteed (callers that need ordering sort).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// A directory or file whose name matches any of these is skipped together
/// with its entire subtree. Patterns are single path-segment literals.
const EXCLUDED_SEGMENTS: [&str; 5] = ["node_modules", "out", ".syncline", ".git", ".DS_Store"];

/// Skipped by leaf name wherever it appears.
const EXCLUDED_LEAVES: [&str; 1] = [".env"];

pub fn is_excluded_segment(name: &str) -> bool {
    EXCLUDED_SEGMENTS.contains(&name)
}

/// Enumerates regular files under `base`. Symlinks and other special file
/// types are not yielded.
pub fn walk_project(base: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    walk_into(base, "", &mut files)?;
    Ok(files)
}

fn walk_into(dir: &Path, rel: &str, out: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir entry in {}", dir.display()))?;
        let name_os = entry.file_name();
        let Some(name) = name_os.to_str() else {
            // Non-UTF-8 names cannot appear in the manifest path map.
            continue;
        };
        if is_excluded_segment(name) || EXCLUDED_LEAVES.contains(&name) {
            continue;
        }

        let rel_path = if rel.is_empty() {
            name.to_string()
        } else {
            format!("{rel}/{name}")
        };

        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if file_type.is_dir() {
            walk_into(&entry.path(), &rel_path, out)?;
        } else if file_type.is_file() {
            out.push(rel_path);
        }
    }
    Ok(())
}
