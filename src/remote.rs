use anyhow::{Context, Result};

use crate::credentials::normalize_base_url;

mod auth;
mod http_client;
mod sync;
mod types;

pub use self::types::*;

/// Typed wrapper around the platform's CLI API. Holds the base URL and, for
/// authenticated endpoints, the bearer token. One blocking request at a time.
pub struct PlatformClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl PlatformClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("syncline")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: normalize_base_url(base_url).to_string(),
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
