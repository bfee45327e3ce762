//! errid configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Project-level (errid.toml)
//! 3. Default values
//! ```
//!
//! ```toml
//! [docs]
//! base_url = "https://docs.example.org/errors"
//! output = "docs/errors"
//!
//! [snapshot]
//! path = "catalog/error_message_ids.json"
//!
//! [log]
//! level = "info"
//! ```
//!
//! The sentinel offset is deliberately not configurable here: it is part of
//! the published numbering and lives with the catalog.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::docs::DEFAULT_DOCS_BASE;
use crate::snapshot::DEFAULT_SNAPSHOT_PATH;
use crate::util::logger::LogLevel;

/// Project config file name
pub const CONFIG_FILE_NAME: &str = "errid.toml";

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    /// Documentation settings
    #[serde(default)]
    pub docs: DocsConfig,
    /// Snapshot settings
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Documentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Base of the per-code help page URL (`<base_url>/<number>`)
    #[serde(default = "default_docs_base")]
    pub base_url: String,
    /// Directory the help page stubs are generated into
    #[serde(default = "default_docs_output")]
    pub output: PathBuf,
}

fn default_docs_base() -> String {
    DEFAULT_DOCS_BASE.to_string()
}

fn default_docs_output() -> PathBuf {
    PathBuf::from(DEFAULT_DOCS_BASE)
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            base_url: default_docs_base(),
            output: default_docs_output(),
        }
    }
}

/// Snapshot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Checked-in snapshot of the last published catalog
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Load configuration from an explicit file
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::IoError)?;
    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Load `errid.toml` from `dir`; returns default config if it doesn't exist
pub fn load_project_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(ToolConfig::default());
    }
    load_config(&path)
}

/// Save configuration
pub fn save_config(
    config: &ToolConfig,
    path: &Path,
) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
    fs::write(path, content).map_err(ConfigError::IoError)?;
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Config parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Config serialize error: {0}")]
    SerializeError(toml::ser::Error),
}
