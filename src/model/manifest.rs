use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Remote-known state of one file. The etag is an MD5 content hash, quoted
/// per HTTP convention; compare it quote-stripped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFile {
    pub etag: String,
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// Full remote file listing for a project at a point in time. Paths are
/// relative, forward-slash separated, and unique.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncManifest {
    pub project_id: String,
    pub version: u64,

    #[serde(default)]
    pub prefix: Option<String>,

    pub files: HashMap<String, ManifestFile>,
}

/// What this directory last synced to. `version` is the optimistic-concurrency
/// token for the next push; it must equal the remote version at the moment the
/// state was written.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub version: u64,

    #[serde(default)]
    pub manifest: HashMap<String, ManifestFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
}

/// Local-vs-last-synced delta computed per push invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PushDiff {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl PushDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Paths whose contents need uploading (added + modified).
    pub fn changed(&self) -> Vec<String> {
        let mut changed = Vec::with_capacity(self.added.len() + self.modified.len());
        changed.extend(self.added.iter().cloned());
        changed.extend(self.modified.iter().cloned());
        changed
    }
}
