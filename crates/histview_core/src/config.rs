//! Configuration for the history cache and refresh dispatch.

use crate::error::{HistError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up by [`Config::load`].
pub const CONFIG_FILE: &str = "histview.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// History cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Refresh dispatch configuration.
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl Config {
    /// Load configuration from `histview.toml` in `dir`, or defaults if the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| HistError::ConfigError(format!("failed to read config: {}", e)))?;
            toml::from_str(&content)
                .map_err(|e| HistError::ConfigError(format!("failed to parse config: {}", e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to `histview.toml` in `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)
            .map_err(|e| HistError::ConfigError(format!("failed to serialize config: {}", e)))?;
        fs::write(&path, content)
            .map_err(|e| HistError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }
}

/// History cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Rows to preallocate (default: 1000). One extra row is always reserved
    /// for the working-directory commit.
    pub capacity: usize,

    /// Also drop the row table on `clear()` (default: false, rows are kept
    /// and overwritten by the next load).
    pub clear_rows_on_reset: bool,

    /// Drop the identifier-index entry of a commit's first parent when the
    /// child is inserted (default: false).
    pub compact_parent_index: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            clear_rows_on_reset: false,
            compact_parent_index: false,
        }
    }
}

/// Refresh dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Collapse requests queued while busy into one (default: true).
    pub coalesce: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { coalesce: true }
    }
}
