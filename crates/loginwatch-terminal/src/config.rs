//! Terminal configuration
//!
//! Loaded from TOML. Every key is optional; missing keys take their defaults
//! and unknown keys are rejected so typos do not go unnoticed.
//!
//! ```toml
//! data_file = "sld_system_data.txt"
//! log_level = "info"
//! autosave_on_exit = true
//! load_on_start = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TerminalError};

/// Default snapshot file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "sld_system_data.txt";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "loginwatch.toml";

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    /// Snapshot used for start-up load, exit save and blank filename prompts
    pub data_file: PathBuf,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Save to `data_file` when leaving the shell
    pub autosave_on_exit: bool,
    /// Load `data_file` when the shell starts
    pub load_on_start: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "info".to_string(),
            autosave_on_exit: true,
            load_on_start: true,
        }
    }
}

impl TerminalConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            let message = format!("invalid config: {e}");
            TerminalError::Config(message)
        })
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| file_error("read", path, e))?;
        toml::from_str(&text).map_err(|e| file_error("parse", path, e))
    }

    /// Resolve the configuration for this run
    ///
    /// An explicit path must exist. Without one, the first existing file from
    /// [`default_config_paths`] is used, else the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        for path in default_config_paths() {
            if path.is_file() {
                debug!(path = %path.display(), "Using config file");
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, verbose: bool) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            let message = format!("Failed to serialize config: {e}");
            TerminalError::Config(message)
        })
    }
}

fn file_error(action: &str, path: &Path, err: impl std::fmt::Display) -> TerminalError {
    let path = path.display();
    TerminalError::Config(format!("Failed to {action} config file {path}: {err}"))
}

/// Config locations tried when no `--config` is given, in order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("loginwatch").join("config.toml"));
    }
    paths
}
