use crate::domain::entities::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "FLAGDECK_API_URL";
pub const API_TOKEN_ENV: &str = "FLAGDECK_API_TOKEN";

pub struct ConfigRepository {
    config_path: PathBuf,
}

impl ConfigRepository {
    pub fn new() -> Self {
        let config_dir = if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config").join("flagdeck")
        } else {
            PathBuf::from(".")
        };

        Self::with_path(config_dir.join("config.json"))
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            tracing::debug!("No config at {:?}, using defaults", self.config_path);
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .context("Failed to read config file")?;

        let config = serde_json::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Loads the file config and applies `FLAGDECK_API_URL` and
    /// `FLAGDECK_API_TOKEN` on top.
    pub fn load_with_env(&self) -> Result<AppConfig> {
        let config = self.load()?;
        Ok(apply_env_overrides(
            config,
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_TOKEN_ENV).ok(),
        ))
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(config)
            .context("Failed to serialize config")?;

        fs::write(&self.config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }
}

impl Default for ConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(
    mut config: AppConfig,
    api_url: Option<String>,
    api_token: Option<String>,
) -> AppConfig {
    if let Some(url) = api_url.filter(|u| !u.is_empty()) {
        config.api_url = url;
    }
    if let Some(token) = api_token.filter(|t| !t.is_empty()) {
        config.api_token = Some(token);
    }
    config
}
