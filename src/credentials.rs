//! Stored login sessions, one per platform base URL, kept in a single JSON
//! file in the user's configuration directory. The file is rewritten whole on
//! every mutation; a corrupt or unreadable file reads as empty since a
//! credential is always recoverable by logging in again.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::remote::UserIdentity;
use crate::store::write_atomic;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    pub token: String,
    pub user: UserIdentity,
    pub created_at: String,
}

pub struct CredentialStore {
    path: PathBuf,
}

/// Trailing slashes are insignificant in a platform base URL; keys in the
/// credentials file are always stored stripped.
pub fn normalize_base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("SYNCLINE_CONFIG_DIR")
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir).join("credentials.json"));
        }
        let base = dirs::config_dir().context("locate user config directory")?;
        Ok(base.join("syncline").join("credentials.json"))
    }

    pub fn get(&self, base_url: &str) -> Option<CredentialEntry> {
        self.read_all()
            .remove(normalize_base_url(base_url))
    }

    pub fn set(&self, base_url: &str, token: &str, user: &UserIdentity) -> Result<()> {
        let created_at = time::OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format createdAt timestamp")?;
        let mut entries = self.read_all();
        entries.insert(
            normalize_base_url(base_url).to_string(),
            CredentialEntry {
                token: token.to_string(),
                user: user.clone(),
                created_at,
            },
        );
        self.write_all(&entries)
    }

    pub fn remove(&self, base_url: &str) -> Result<()> {
        let mut entries = self.read_all();
        entries.remove(normalize_base_url(base_url));
        self.write_all(&entries)
    }

    fn read_all(&self) -> HashMap<String, CredentialEntry> {
        let Ok(bytes) = fs::read(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    fn write_all(&self, entries: &HashMap<String, CredentialEntry>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries).context("serialize credentials")?;
        write_atomic(&self.path, &bytes).context("write credentials file")?;
        restrict_to_owner(&self.path)
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &std::path::Path) -> Result<()> {
    Ok(())
}
