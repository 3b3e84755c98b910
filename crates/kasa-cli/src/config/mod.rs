//! CLI configuration: stored file, environment and flags.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use kasa::list::DEFAULT_PER_PAGE;
use kasa_core::BaseUrl;
use kasa_http::HttpApi;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the stored base URL.
pub const BASE_URL_ENV: &str = "KASA_BASE_URL";

/// Environment variable overriding the stored token.
pub const TOKEN_ENV: &str = "KASA_TOKEN";

/// Contents of the config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<BaseUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Effective settings of one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: BaseUrl,
    pub token: Option<String>,
    pub per_page: u32,
}

impl Settings {
    /// Merge the config file, the environment and the `--base-url` flag,
    /// later sources winning.
    pub fn resolve(flag: Option<BaseUrl>) -> Result<Self> {
        let stored = storage::load().context("Failed to load config")?;
        Self::merge(stored, Env::capture(), flag)
    }

    fn merge(stored: StoredConfig, env: Env, flag: Option<BaseUrl>) -> Result<Self> {
        let env_base = env
            .base_url
            .map(|raw| BaseUrl::new(&raw).with_context(|| format!("Invalid {}", BASE_URL_ENV)))
            .transpose()?;

        let base_url = flag
            .or(env_base)
            .or(stored.base_url)
            .context("No API base URL. Run 'kasa config set --url <url>' or set KASA_BASE_URL.")?;

        Ok(Self {
            base_url,
            token: env.token.or(stored.token),
            per_page: stored.per_page.unwrap_or(DEFAULT_PER_PAGE),
        })
    }

    /// HTTP client for these settings.
    pub fn api(&self) -> Result<Arc<HttpApi>> {
        let api = HttpApi::new(self.base_url.clone()).context("Failed to create HTTP client")?;
        let api = match &self.token {
            Some(token) => api.with_token(token.clone()),
            None => api,
        };
        Ok(Arc::new(api))
    }
}

/// Overrides read from the process environment; blank values are ignored.
#[derive(Debug, Default)]
struct Env {
    base_url: Option<String>,
    token: Option<String>,
}

impl Env {
    fn capture() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            base_url: read(BASE_URL_ENV),
            token: read(TOKEN_ENV),
        }
    }
}
