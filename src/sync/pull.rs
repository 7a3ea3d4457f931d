use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::model::SyncState;
use crate::progress::ProgressObserver;
use crate::remote::PlatformClient;
use crate::store::SyncStore;
use crate::walker::walk_project;

use super::diff::{hash_file, strip_etag_quotes};
use super::now_rfc3339;

#[derive(Clone, Copy, Debug, Default)]
pub struct PullOptions {
    /// Re-download every remote file and delete local files the remote
    /// manifest does not know about.
    pub force: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PullSummary {
    pub downloaded: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub version: u64,
}

/// Fetches the remote manifest and downloads every missing or content-changed
/// file, one at a time. Local files absent from the manifest are left
/// untouched unless `force` is set: a file changed remotely is always worth
/// downloading, but deleting local-only work must be asked for explicitly.
/// Sync state is written only after all file operations complete.
pub fn pull_project(
    client: &PlatformClient,
    project_id: &str,
    project_dir: &Path,
    opts: &PullOptions,
    progress: &mut dyn ProgressObserver,
) -> Result<PullSummary> {
    let manifest = client.fetch_manifest(project_id)?;
    let mut summary = PullSummary {
        version: manifest.version,
        ..Default::default()
    };

    for (rel, remote) in &manifest.files {
        reject_escaping_path(rel)?;
        let local_path = project_dir.join(rel);
        let wanted = opts.force
            || !local_path.is_file()
            || hash_file(&local_path)? != strip_etag_quotes(&remote.etag);
        if !wanted {
            summary.unchanged += 1;
            continue;
        }

        progress.progress(&format!("downloading {rel}"));
        let bytes = client.download_file(project_id, rel)?;
        if let Some(parent) = local_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&local_path, &bytes).with_context(|| format!("write {rel}"))?;
        summary.downloaded += 1;
    }

    if opts.force {
        for rel in walk_project(project_dir)? {
            if manifest.files.contains_key(&rel) {
                continue;
            }
            progress.progress(&format!("deleting {rel}"));
            let local_path = project_dir.join(&rel);
            fs::remove_file(&local_path).with_context(|| format!("delete {rel}"))?;
            summary.deleted += 1;
            prune_empty_parents(project_dir, &local_path);
        }
    }

    let store = SyncStore::open(project_dir);
    store.write_state(&SyncState {
        version: manifest.version,
        manifest: manifest.files,
        last_sync: Some(now_rfc3339()?),
    })?;

    Ok(summary)
}

/// Manifest paths are server-provided; refuse anything that would resolve
/// outside the project directory before touching the filesystem.
fn reject_escaping_path(rel: &str) -> Result<()> {
    if rel.starts_with('/') || rel.split('/').any(|seg| seg == "..") {
        bail!("manifest path {rel:?} escapes the project directory");
    }
    Ok(())
}

/// Deleting the last file of a directory leaves an empty shell the remote
/// manifest knows nothing about; prune upward until a non-empty directory or
/// the project root.
fn prune_empty_parents(project_dir: &Path, removed: &Path) {
    let mut parent = removed.parent();
    while let Some(dir) = parent {
        if dir == project_dir || fs::remove_dir(dir).is_err() {
            break;
        }
        parent = dir.parent();
    }
}
