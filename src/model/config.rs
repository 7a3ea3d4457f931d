use serde::{Deserialize, Serialize};

/// Project-scoped configuration persisted in `.syncline/config.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteBinding>,
}

impl ProjectConfig {
    pub fn empty() -> Self {
        Self {
            version: 1,
            remote: None,
        }
    }
}

/// Which platform project this directory is linked to.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}
