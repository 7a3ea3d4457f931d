//! Device-code login and logout.
//!
//! Login walks Unauthenticated -> CodeRequested -> Polling and ends in
//! Approved, or fails with one of three distinguishable conditions: the
//! server declaring the code expired (AuthExpired), the server not knowing
//! the code (AuthInvalid), or the client-side deadline elapsing (AuthTimeout).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::credentials::{CredentialStore, normalize_base_url};
use crate::error::PlatformError;
use crate::progress::ProgressObserver;
use crate::remote::{PlatformClient, TokenPollResponse, UserIdentity};

pub struct LoginOptions {
    /// Best-effort attempt to open the verification URL in a browser.
    pub open_browser: bool,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self { open_browser: true }
    }
}

pub fn login(
    base_url: &str,
    credentials: &CredentialStore,
    opts: &LoginOptions,
    progress: &mut dyn ProgressObserver,
) -> Result<UserIdentity> {
    let client = PlatformClient::new(base_url, None)?;
    let device = client.create_device_code()?;

    progress.progress(&format!(
        "To sign in, visit {} and enter the code {}",
        device.verification_url, device.user_code
    ));
    if opts.open_browser {
        open_in_browser(&device.verification_url);
    }

    let deadline = Instant::now() + Duration::from_secs(device.expires_in);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(PlatformError::AuthTimeout.into());
        }
        std::thread::sleep(remaining.min(Duration::from_secs(device.interval)));

        match client.poll_device_token(&device.device_code)? {
            TokenPollResponse::Pending => {}
            TokenPollResponse::Approved { token, user } => {
                credentials
                    .set(client.base_url(), &token, &user)
                    .context("store credential")?;
                return Ok(user);
            }
        }
    }
}

/// Revokes the token server-side when one is stored, then removes the local
/// credential. The revoke is best-effort: an unreachable server is reported
/// through the observer and never leaves the local state logged in.
pub fn logout(
    base_url: &str,
    credentials: &CredentialStore,
    progress: &mut dyn ProgressObserver,
) -> Result<()> {
    let base_url = normalize_base_url(base_url);
    if let Some(entry) = credentials.get(base_url) {
        let client = PlatformClient::new(base_url, Some(entry.token))?;
        if let Err(err) = client.revoke_token() {
            progress.progress(&format!("could not revoke token on the server: {err:#}"));
        }
    }
    credentials
        .remove(base_url)
        .context("remove stored credential")
}

fn open_in_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let launcher = "open";
    #[cfg(not(target_os = "macos"))]
    let launcher = "xdg-open";

    let _ = std::process::Command::new(launcher)
        .arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn();
}
