//! Bot configuration, read once at startup from a YAML file:
//!
//! ```yaml
//! bot_token: "123456:ABC-DEF"
//! output_dirpath_list:
//!   - path: /srv/photos
//! ```
//!
//! Only the first entry of `output_dirpath_list` is used.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ApiToken;

/// Where the bot looks for its config when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "./main_config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Config is empty")]
    EmptyDocument,

    #[error("Config has no bot_token")]
    MissingToken,

    #[error("Config has an empty output_dirpath_list")]
    NoOutputDirs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputDir {
    /// Directory photos are written to. Must already exist.
    pub path: PathBuf,
}

impl OutputDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: ApiToken,

    /// Output directories, in order of preference.
    pub output_dirpath_list: Vec<OutputDir>,
}

impl Config {
    /// Read and validate the config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read config from {}", path.display());
        Self::from_yaml(&contents)
    }

    /// Parse and validate a YAML config document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let is_blank = contents
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if is_blank {
            return Err(ConfigError::EmptyDocument);
        }

        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        if value.is_null() || value.as_mapping().is_some_and(|m| m.is_empty()) {
            return Err(ConfigError::EmptyDocument);
        }

        let config: Config = serde_yaml::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        self.base_dirpath()?;
        Ok(())
    }

    /// Returns the directory photos are saved to: the `path` of the first
    /// entry in `output_dirpath_list`.
    pub fn base_dirpath(&self) -> Result<&Path, ConfigError> {
        self.output_dirpath_list
            .first()
            .map(|dir| dir.path.as_path())
            .ok_or(ConfigError::NoOutputDirs)
    }
}
