use anyhow::{Context, Result};
use reqwest::blocking::multipart;

use crate::error::PlatformError;
use crate::model::SyncManifest;

use super::{CliProject, ConflictResponse, CreatePushResult, PlatformClient, PushResult};

impl PlatformClient {
    pub fn list_projects(&self) -> Result<Vec<CliProject>> {
        let resp = self
            .authed(self.client.get(self.url("/api/cli/projects")))?
            .send()
            .context("list projects")?;
        let resp = self.ensure_ok(resp, "list projects")?;
        resp.json().context("parse projects")
    }

    pub fn fetch_manifest(&self, project_id: &str) -> Result<SyncManifest> {
        let resp = self
            .authed(
                self.client
                    .get(self.url(&format!("/api/cli/projects/{project_id}/sync/manifest"))),
            )?
            .send()
            .context("fetch manifest")?;
        let resp = self.ensure_ok(resp, "fetch manifest")?;
        resp.json().context("parse manifest")
    }

    pub fn download_file(&self, project_id: &str, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .authed(
                self.client
                    .get(self.url(&format!("/api/cli/projects/{project_id}/sync/file")))
                    .query(&[("path", path)]),
            )?
            .send()
            .with_context(|| format!("download {path}"))?;
        let resp = self.ensure_ok(resp, "download file")?;
        let bytes = resp
            .bytes()
            .with_context(|| format!("read body of {path}"))?;
        Ok(bytes.to_vec())
    }

    /// One multipart request covering every changed file plus the deleted
    /// list, guarded by `base_version`. A 409 response surfaces as
    /// VersionConflict; it is never retried here.
    pub fn push(
        &self,
        project_id: &str,
        base_version: u64,
        deleted: &[String],
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<PushResult> {
        let mut form = multipart::Form::new()
            .percent_encode_noop()
            .text("baseVersion", base_version.to_string())
            .text(
                "deleted",
                serde_json::to_string(deleted).context("encode deleted paths")?,
            );
        for (path, bytes) in files {
            let file_name = path.rsplit('/').next().unwrap_or(&path).to_string();
            form = form.part(path, multipart::Part::bytes(bytes).file_name(file_name));
        }

        let resp = self
            .authed(
                self.client
                    .post(self.url(&format!("/api/cli/projects/{project_id}/sync/push"))),
            )?
            .multipart(form)
            .send()
            .context("push")?;

        if resp.status() == reqwest::StatusCode::CONFLICT {
            let conflict: ConflictResponse = resp.json().unwrap_or_default();
            return Err(PlatformError::VersionConflict {
                base_version,
                remote_version: conflict.current_version,
            }
            .into());
        }

        let resp = self.ensure_ok(resp, "push")?;
        resp.json().context("parse push response")
    }

    /// Bootstrap: creates a project under `org_id` and uploads the whole tree
    /// in one multipart request. The only sync path without a project id.
    pub fn create_push(
        &self,
        org_id: &str,
        name: Option<&str>,
        figma_project_id: Option<&str>,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<CreatePushResult> {
        let mut form = multipart::Form::new()
            .percent_encode_noop()
            .text("orgId", org_id.to_string());
        if let Some(name) = name {
            form = form.text("name", name.to_string());
        }
        if let Some(figma_project_id) = figma_project_id {
            form = form.text("figmaProjectId", figma_project_id.to_string());
        }
        for (path, bytes) in files {
            let file_name = path.rsplit('/').next().unwrap_or(&path).to_string();
            form = form.part(path, multipart::Part::bytes(bytes).file_name(file_name));
        }

        let resp = self
            .authed(self.client.post(self.url("/api/cli/projects/create-push")))?
            .multipart(form)
            .send()
            .context("create-push")?;
        let resp = self.ensure_ok(resp, "create-push")?;
        resp.json().context("parse create-push response")
    }
}
