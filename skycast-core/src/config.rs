use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::units::TempScale;

/// API key the activity ships with; a user-supplied key takes precedence.
pub const DEFAULT_API_KEY: &str = "43ae262450afb936759b9e905323c7e5";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional user-supplied API key.
    pub api_key: Option<String>,

    /// Preferred temperature scale, e.g. "celsius" or "fahrenheit".
    pub temp_scale: Option<String>,
}

impl Config {
    /// API key to use for requests: the configured one, or the built-in.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(DEFAULT_API_KEY)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Preferred temperature scale as a strongly-typed value.
    pub fn temp_scale(&self) -> Result<TempScale> {
        match self.temp_scale.as_deref() {
            None => Ok(TempScale::default()),
            Some(s) => TempScale::try_from(s),
        }
    }

    pub fn set_temp_scale(&mut self, scale: TempScale) {
        self.temp_scale = Some(scale.symbol().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
