//! Configuration management for bufnav.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{
    Config, GeneralSettings, KeySettings, LayoutSettings, LoggingSettings, ThemeSettings,
};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const MOUSE: bool = true;
    pub const TICK_RATE_MS: u64 = 250;
    pub const QUIT_KEY: &str = "ctrl+c";
    pub const DOWN_KEY: &str = "down";
    pub const UP_KEY: &str = "up";
    pub const MASTER_GEOMETRY: [u16; 4] = [0, 0, 20, 11];
    pub const DETAIL_GEOMETRY: [u16; 4] = [21, 0, 60, 5];
    pub const STATS_GEOMETRY: [u16; 4] = [21, 6, 60, 11];
    pub const SELECTED_FG: &str = "green";
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "bufnav.log";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let original_content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;

            let config = Self::validate_content(&original_content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(config_path)?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path of the log file: the configured one, or the cache directory.
    pub fn log_file_path(&self) -> PathBuf {
        match self.logging.file_path {
            Some(ref path) => PathBuf::from(path),
            None => get_cache_dir()
                .unwrap_or_else(|_| std::env::temp_dir())
                .join(defaults::LOG_FILE_NAME),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}
