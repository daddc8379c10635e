//! Application configuration persisted as TOML under the `.mlstudio` folder.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Backend used when no configuration file exists.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Settings loaded at startup. Session state itself is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the pipeline backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Errors that may occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not resolve or create the application directory.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML.
    #[error("Failed to parse config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The configuration could not be serialized to TOML.
    #[error("Failed to serialize config: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    /// The configured base URL does not parse as a URL.
    #[error("Invalid api_base_url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: AppConfig =
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    url::Url::parse(&config.api_base_url).map_err(|source| ConfigError::InvalidBaseUrl {
        url: config.api_base_url.clone(),
        source,
    })?;
    // Endpoint paths are appended verbatim, so strip any trailing slash once.
    config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
    Ok(config)
}

/// Persist configuration, overwriting any previous contents.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
