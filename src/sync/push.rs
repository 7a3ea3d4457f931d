use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{RemoteBinding, SyncState};
use crate::progress::ProgressObserver;
use crate::remote::{CreatePushResult, PlatformClient};
use crate::store::SyncStore;
use crate::walker::walk_project;

use super::diff::{compute_push_diff, with_sidecar_configs};
use super::now_rfc3339;

#[derive(Clone, Copy, Debug, Default)]
pub struct PushOptions {
    /// Upload every local file, not just the ones the diff marks changed.
    pub force: bool,
}

#[derive(Clone, Debug)]
pub enum PushOutcome {
    /// Nothing added, modified, or deleted since the last sync.
    NoChanges,
    Pushed {
        version: u64,
        uploaded: Vec<String>,
        deleted: Vec<String>,
    },
}

/// Diffs the local tree against the last-synced manifest and submits one
/// multipart request with every changed file (plus sidecar configs) and the
/// deleted paths, guarded by the persisted base version. Server-reported
/// per-file `errors[]` are surfaced as warnings; the files that did succeed
/// are still reflected in the persisted sync state.
pub fn push_project(
    client: &PlatformClient,
    project_id: &str,
    project_dir: &Path,
    opts: &PushOptions,
    progress: &mut dyn ProgressObserver,
) -> Result<PushOutcome> {
    let store = SyncStore::open(project_dir);
    let state = store.read_state()?;
    let (base_version, last_manifest) = match state {
        Some(st) => (st.version, st.manifest),
        None => (0, HashMap::new()),
    };

    let diff = compute_push_diff(project_dir, &last_manifest)?;
    let changed = if opts.force {
        let mut all = walk_project(project_dir)?;
        all.sort();
        all
    } else {
        diff.changed()
    };

    if changed.is_empty() && diff.deleted.is_empty() {
        return Ok(PushOutcome::NoChanges);
    }

    let upload = with_sidecar_configs(project_dir, &changed);
    let mut files = Vec::with_capacity(upload.len());
    for rel in &upload {
        let bytes = fs::read(project_dir.join(rel)).with_context(|| format!("read {rel}"))?;
        progress.progress(&format!("uploading {rel}"));
        files.push((rel.clone(), bytes));
    }

    let result = client.push(project_id, base_version, &diff.deleted, files)?;
    for warning in &result.errors {
        progress.warning(warning);
    }

    store.write_state(&SyncState {
        version: result.version,
        manifest: result.files,
        last_sync: Some(now_rfc3339()?),
    })?;

    Ok(PushOutcome::Pushed {
        version: result.version,
        uploaded: result.uploaded,
        deleted: result.deleted,
    })
}

#[derive(Clone, Debug, Default)]
pub struct CreatePushOptions {
    pub name: Option<String>,
    pub figma_project_id: Option<String>,
}

/// Bootstrap: uploads the entire local tree to a newly created project (no
/// diff, there is no prior manifest), then persists fresh sync state and
/// links the returned project id in the local config.
pub fn create_push_project(
    client: &PlatformClient,
    org_id: &str,
    project_dir: &Path,
    opts: &CreatePushOptions,
    progress: &mut dyn ProgressObserver,
) -> Result<CreatePushResult> {
    let mut paths = walk_project(project_dir)?;
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for rel in &paths {
        let bytes = fs::read(project_dir.join(rel)).with_context(|| format!("read {rel}"))?;
        progress.progress(&format!("uploading {rel}"));
        files.push((rel.clone(), bytes));
    }

    let result = client.create_push(
        org_id,
        opts.name.as_deref(),
        opts.figma_project_id.as_deref(),
        files,
    )?;
    for warning in &result.errors {
        progress.warning(warning);
    }

    let store = SyncStore::open(project_dir);
    store.write_state(&SyncState {
        version: result.sync_version,
        manifest: result.files.clone(),
        last_sync: Some(now_rfc3339()?),
    })?;

    let mut cfg = store.read_config()?;
    let mut binding = cfg.remote.take().unwrap_or_default();
    binding.base_url = Some(client.base_url().to_string());
    binding.project_id = Some(result.project_id.clone());
    binding.org_id = Some(org_id.to_string());
    cfg.remote = Some(binding);
    store.write_config(&cfg)?;

    Ok(result)
}
