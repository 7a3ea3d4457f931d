//! Content-hash diffing. Both diff directions key on the MD5 of raw bytes,
//! never on modification times; etags are compared quote-stripped.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use md5::{Digest, Md5};

use crate::model::{ManifestFile, PushDiff};
use crate::walker::walk_project;

pub fn md5_etag(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Manifest etags arrive quoted per HTTP convention (`"abc123"`).
pub fn strip_etag_quotes(etag: &str) -> &str {
    etag.trim_matches('"')
}

pub fn hash_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(md5_etag(&bytes))
}

/// Compares the local tree against the last-synced manifest (empty when this
/// directory was never synced). Output lists are sorted for stable display;
/// the algorithm itself is order-independent.
pub fn compute_push_diff(
    project_dir: &Path,
    last_synced: &HashMap<String, ManifestFile>,
) -> Result<PushDiff> {
    let local = walk_project(project_dir)?;
    let mut diff = PushDiff::default();

    for rel in &local {
        let hash = hash_file(&project_dir.join(rel))?;
        match last_synced.get(rel) {
            None => diff.added.push(rel.clone()),
            Some(known) if strip_etag_quotes(&known.etag) != hash => {
                diff.modified.push(rel.clone())
            }
            Some(_) => {}
        }
    }

    let local_set: HashSet<&str> = local.iter().map(String::as_str).collect();
    for path in last_synced.keys() {
        if !local_set.contains(path.as_str()) {
            diff.deleted.push(path.clone());
        }
    }

    diff.added.sort();
    diff.modified.sort();
    diff.deleted.sort();
    Ok(diff)
}

const SIDECAR_EXTENSIONS: [&str; 3] = ["js", "cjs", "json"];

/// The server associates directory-level metadata with a config file named
/// after the directory itself (`components/button/button.js`). Uploading a
/// changed file without its directory's config would desynchronize how the
/// server interprets the other files there, so the first existing candidate
/// (`.js`, `.cjs`, `.json`, in that order) is added to the upload set even
/// when unchanged.
pub fn with_sidecar_configs(project_dir: &Path, changed: &[String]) -> Vec<String> {
    let mut upload: Vec<String> = changed.to_vec();
    let mut present: HashSet<String> = changed.iter().cloned().collect();
    let mut dirs_seen: HashSet<&str> = HashSet::new();

    for path in changed {
        let Some((dir, _leaf)) = path.rsplit_once('/') else {
            continue;
        };
        if !dirs_seen.insert(dir) {
            continue;
        }
        let dir_name = dir.rsplit('/').next().unwrap_or(dir);
        for ext in SIDECAR_EXTENSIONS {
            let candidate = format!("{dir}/{dir_name}.{ext}");
            if project_dir.join(&candidate).is_file() {
                if present.insert(candidate.clone()) {
                    upload.push(candidate);
                }
                break;
            }
        }
    }

    upload
}
