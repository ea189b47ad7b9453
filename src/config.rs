use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_url() -> String {
    "http://127.0.0.1:8080/data.json".to_string()
}

fn default_request_timeout() -> u64 {
    5000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    #[serde(default = "default_interval")]
    pub interval_s: u64,
}

fn default_interval() -> u64 {
    60
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_s: default_interval(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config TOML")?;
        Ok(config)
    }

    /// Missing config file is fine (all fields have defaults); a present but
    /// malformed file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file missing, using defaults");
            return Ok(Config::default());
        }
        Self::load(path)
    }
}
