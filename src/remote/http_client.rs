use anyhow::Result;

use crate::error::PlatformError;

use super::PlatformClient;

impl PlatformClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the bearer token, failing with NotAuthenticated when the
    /// client was built without one.
    pub(super) fn authed(
        &self,
        rb: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::RequestBuilder> {
        let token = self.token.as_deref().ok_or_else(|| {
            anyhow::Error::new(PlatformError::NotAuthenticated {
                base_url: self.base_url.clone(),
            })
        })?;
        Ok(rb.header(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {token}"),
        ))
    }

    /// Maps any non-2xx response to a Transport error carrying the status and
    /// the server message parsed from the JSON error body when present.
    /// Statuses with dedicated semantics (409, 410, 404 on specific
    /// endpoints) are handled at their call sites before this.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = server_message(resp)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        Err(PlatformError::Transport {
            label: label.to_string(),
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

fn server_message(resp: reqwest::blocking::Response) -> Option<String> {
    let body = resp.text().ok()?;
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["error", "message"] {
            if let Some(msg) = v.get(key).and_then(|m| m.as_str()) {
                return Some(msg.to_string());
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
