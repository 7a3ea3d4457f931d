use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{ProjectConfig, SyncState};

pub const STORE_DIR: &str = ".syncline";

/// Per-project persistence under the hidden `.syncline/` directory:
/// `config.json` (remote binding) and `state.json` (last-synced manifest).
/// Both files are read and rewritten whole; writes go through a temp file
/// plus rename so a crash never leaves a half-written state.
#[derive(Clone)]
pub struct SyncStore {
    root: PathBuf,
}

impl SyncStore {
    pub fn store_dir(project_root: &Path) -> PathBuf {
        project_root.join(STORE_DIR)
    }

    pub fn open(project_root: &Path) -> Self {
        Self {
            root: Self::store_dir(project_root),
        }
    }

    pub fn read_config(&self) -> Result<ProjectConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(ProjectConfig::empty());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: ProjectConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ProjectConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")
    }

    /// Returns `None` when this directory has never been synced.
    pub fn read_state(&self) -> Result<Option<SyncState>> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: SyncState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(Some(st))
    }

    pub fn write_state(&self, st: &SyncState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize sync state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
