//! Engine configuration loaded from a TOML file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level configuration.
///
/// All fields have defaults so the engine works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub listing: ListingConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Directory listing and refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Top-level names admitted when listing the device root.
    #[serde(default = "default_root_allow_list")]
    pub root_allow_list: Vec<String>,
    /// Age after which a listed directory is considered stale.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl ListingConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            root_allow_list: default_root_allow_list(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

fn default_root_allow_list() -> Vec<String> {
    ["data", "sdcard", "mnt", "system", "storage"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_refresh_interval_ms() -> u64 {
    4000
}
