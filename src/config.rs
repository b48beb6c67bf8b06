//! Process configuration read from the environment (and an optional `.env`).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use crate::gemini::{GeminiClient, ImageAnalyzer, DEFAULT_API_BASE, DEFAULT_MODEL};

pub const ENV_API_KEY: &str = "GOOGLE_AI_API_KEY";
pub const ENV_API_KEY_ALT: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_ALT));

        let bind_addr = get(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .with_context(|| format!("{} is not a valid socket address", ENV_BIND_ADDR))?;

        let max_upload_bytes = match get(ENV_MAX_UPLOAD_BYTES) {
            Some(v) => v.parse().with_context(|| {
                format!("{} must be a byte count, got {:?}", ENV_MAX_UPLOAD_BYTES, v)
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            api_key,
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            bind_addr,
            max_upload_bytes,
        })
    }

    /// Builds the Gemini client, or `None` when no API key is configured.
    pub fn analyzer(&self) -> Option<Arc<dyn ImageAnalyzer>> {
        match &self.api_key {
            Some(key) => Some(Arc::new(GeminiClient::new(
                key.clone(),
                self.api_base.clone(),
                self.model.clone(),
            ))),
            None => {
                warn!(
                    "{} not found in environment; /api/analyze will reject uploads",
                    ENV_API_KEY
                );
                None
            }
        }
    }
}
