//! Helio configuration file handling

use anyhow::{Context, Result};
use helio_charts::ChartConfig;
use helio_flow::FlowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "helio.toml";

/// Top-level Helio configuration (helio.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HelioConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Logging configuration
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl HelioConfig {
    /// Load configuration from a file, or from `helio.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = resolve_path(path);
        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `helio init-config` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: HelioConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Load an explicit path, else `./helio.toml` when present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}
