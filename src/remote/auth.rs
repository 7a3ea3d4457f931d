use anyhow::{Context, Result};

use crate::error::PlatformError;

use super::{DeviceCodeResponse, PlatformClient, TokenPollResponse};

impl PlatformClient {
    /// Starts a device-code login. Unauthenticated; failure here is fatal to
    /// the login attempt.
    pub fn create_device_code(&self) -> Result<DeviceCodeResponse> {
        let resp = self
            .client
            .post(self.url("/api/cli/auth/device"))
            .send()
            .context("create device code")?;
        let resp = self.ensure_ok(resp, "create device code")?;
        resp.json().context("parse device code response")
    }

    /// One poll of the token endpoint. 410 means the server declared the code
    /// expired; 404 means the code is unknown and retrying is pointless.
    pub fn poll_device_token(&self, device_code: &str) -> Result<TokenPollResponse> {
        let resp = self
            .client
            .post(self.url("/api/cli/auth/token"))
            .json(&serde_json::json!({ "deviceCode": device_code }))
            .send()
            .context("poll device token")?;

        if resp.status() == reqwest::StatusCode::GONE {
            return Err(PlatformError::AuthExpired.into());
        }
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PlatformError::AuthInvalid.into());
        }

        let resp = self.ensure_ok(resp, "poll device token")?;
        resp.json().context("parse device token response")
    }

    /// Revokes the bearer token server-side. A 401 counts as already revoked.
    pub fn revoke_token(&self) -> Result<()> {
        let resp = self
            .authed(self.client.delete(self.url("/api/cli/auth/token")))?
            .send()
            .context("revoke token")?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        self.ensure_ok(resp, "revoke token")?;
        Ok(())
    }
}
