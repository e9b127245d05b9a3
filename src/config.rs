use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::detect::DEFAULT_SCORING_FAN_OUT;

const CONFIG_DIR: &str = ".mcpscout";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Directory names to exclude from discovery, in addition to the
    /// built-in ignore set
    #[serde(default)]
    pub extra_ignore_dirs: Vec<String>,

    /// Subdirectory scoring probes in flight at once
    #[serde(default = "default_scoring_fan_out")]
    pub scoring_fan_out: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            extra_ignore_dirs: Vec::new(),
            scoring_fan_out: default_scoring_fan_out(),
        }
    }
}

fn default_scoring_fan_out() -> usize {
    DEFAULT_SCORING_FAN_OUT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to a rolling file under `directory`
    #[serde(default)]
    pub enabled: bool,

    /// Mirror logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory (relative paths resolve against the scanned root)
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation strategy: hourly, daily, minutely, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".mcpscout/logs")
}

fn default_file_prefix() -> String {
    "mcpscout".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .mcpscout directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .mcpscout directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the .mcpscout directory
    pub fn tool_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Check if mcpscout has been initialized in the given directory
    pub fn is_initialized(root: &Path) -> bool {
        Self::tool_dir(root).exists()
    }
}
