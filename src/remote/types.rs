//! DTOs for the platform CLI API. The wire contract is camelCase JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ManifestFile;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
}

/// A pending device-code authentication request. `device_code` is the
/// server-side correlation secret; `user_code` is what the operator types in.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCodeResponse {
    pub device_code: String,
    pub user_code: String,
    pub verification_url: String,
    /// Seconds until the device code expires.
    pub expires_in: u64,
    /// Seconds to wait between polls.
    pub interval: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TokenPollResponse {
    Pending,
    Approved { token: String, user: UserIdentity },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliProject {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub org_id: String,

    #[serde(default)]
    pub org_name: String,

    #[serde(default)]
    pub org_slug: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub sync_version: u64,
}

/// Non-fatal per-file problem reported inside an otherwise successful push or
/// create-push result. `kind` is part of the server contract; the client
/// never classifies by sniffing message text.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerWarning {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub kind: WarningKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    /// The server refused the path by policy (not an error in the upload).
    Excluded,
    /// The server accepted the request but could not apply this file.
    #[default]
    Failed,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResult {
    pub version: u64,

    #[serde(default)]
    pub uploaded: Vec<String>,

    #[serde(default)]
    pub deleted: Vec<String>,

    #[serde(default)]
    pub errors: Vec<ServerWarning>,

    pub files: HashMap<String, ManifestFile>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePushResult {
    pub project_id: String,
    pub sync_version: u64,

    #[serde(default)]
    pub uploaded: Vec<String>,

    #[serde(default)]
    pub errors: Vec<ServerWarning>,

    pub files: HashMap<String, ManifestFile>,
}

/// Body of an HTTP 409 push response.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResponse {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub current_version: Option<u64>,

    #[serde(default)]
    pub base_version: Option<u64>,
}
