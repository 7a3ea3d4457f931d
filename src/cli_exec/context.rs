//! Per-invocation command context: the base URL, stores, and working
//! directory are resolved once here and passed by parameter into every sync
//! function. There is no ambient/global configuration lookup.

use std::path::PathBuf;

use anyhow::{Context, Result};

use syncline::credentials::{CredentialStore, normalize_base_url};
use syncline::error::PlatformError;
use syncline::store::SyncStore;

pub(super) const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub(super) struct CommandContext {
    pub(super) base_url: String,
    pub(super) credentials: CredentialStore,
    pub(super) project_dir: PathBuf,
    pub(super) store: SyncStore,
}

pub(super) fn command_context(url_flag: Option<String>) -> Result<CommandContext> {
    let project_dir = std::env::current_dir().context("get current dir")?;
    let store = SyncStore::open(&project_dir);
    let base_url = resolve_base_url(url_flag, &store)?;
    let credentials = CredentialStore::open_default()?;
    Ok(CommandContext {
        base_url,
        credentials,
        project_dir,
        store,
    })
}

/// Flag, then environment, then the linked project's config, then default.
fn resolve_base_url(flag: Option<String>, store: &SyncStore) -> Result<String> {
    if let Some(url) = flag {
        return Ok(normalize_base_url(&url).to_string());
    }
    if let Ok(url) = std::env::var("SYNCLINE_URL")
        && !url.is_empty()
    {
        return Ok(normalize_base_url(&url).to_string());
    }
    let cfg = store.read_config()?;
    if let Some(url) = cfg.remote.and_then(|r| r.base_url) {
        return Ok(normalize_base_url(&url).to_string());
    }
    Ok(DEFAULT_BASE_URL.to_string())
}

pub(super) fn require_token(ctx: &CommandContext) -> Result<String> {
    ctx.credentials
        .get(&ctx.base_url)
        .map(|entry| entry.token)
        .ok_or_else(|| {
            anyhow::Error::new(PlatformError::NotAuthenticated {
                base_url: ctx.base_url.clone(),
            })
        })
}

pub(super) fn require_project_id(ctx: &CommandContext) -> Result<String> {
    let cfg = ctx.store.read_config()?;
    cfg.remote
        .and_then(|r| r.project_id)
        .ok_or_else(|| anyhow::Error::new(PlatformError::NotLinked))
}
