use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

// The development server proxies /api to this address.
const DEFAULT_BASE_URL: &str = "http://localhost:9898/api";
const BASE_URL_ENV: &str = "SEARCHAV_API_BASE";

/// Client configuration. Defaults are overridden by the per-user config
/// file, which is overridden by the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("searchav-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from the per-user config file (if present) and the environment.
    pub fn load() -> Result<Self> {
        let mut cfg = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file: {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("invalid config file: {}", path.display()))?
            }
            _ => Self::default(),
        };
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(base) = std::env::var(BASE_URL_ENV) {
            if !base.trim().is_empty() {
                self.base_url = base;
            }
        }
    }

    fn config_file_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("dev", "searchav", "searchav")?;
        Some(proj.config_dir().join("config.toml"))
    }
}
