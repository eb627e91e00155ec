//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the backend base URL, the year the schedule opens on, the default log
//! limit and an optional request timeout.
//!
//! Configuration is stored at `~/.config/shiftboard/config.json`.
//! `SHIFTBOARD_BASE_URL` and `SHIFTBOARD_YEAR` override the file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::DEFAULT_BASE_URL;

/// Application name used for config/data directory paths
const APP_NAME: &str = "shiftboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Log limit used when the filter field is empty or invalid
pub const DEFAULT_LOG_LIMIT: u32 = 50;

const ENV_BASE_URL: &str = "SHIFTBOARD_BASE_URL";
const ENV_YEAR: &str = "SHIFTBOARD_YEAR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Year the schedule opens on before shifts arrive
    #[serde(default)]
    pub default_year: Option<i32>,
    #[serde(default = "default_log_limit")]
    pub log_limit: u32,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_limit() -> u32 {
    DEFAULT_LOG_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_year: None,
            log_limit: DEFAULT_LOG_LIMIT,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load the config file (defaults when absent) and apply env overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from a variable lookup (the environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(year) = lookup(ENV_YEAR) {
            match year.trim().parse::<i32>() {
                Ok(year) => self.default_year = Some(year),
                Err(_) => warn!(value = %year, "Ignoring invalid {}", ENV_YEAR),
            }
        }
    }

    /// Year the schedule starts on: configured, or the current year
    pub fn start_year(&self) -> i32 {
        self.default_year.unwrap_or_else(|| Local::now().year())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the session flag and log files
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
