//! Application directory helpers anchored to a single `.mlstudio` folder.
//!
//! Config and log files live under the OS config directory by default; the
//! `MLSTUDIO_CONFIG_HOME` environment variable relocates them for tests or
//! portable setups.

use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".mlstudio";
/// Environment variable overriding the base config directory.
pub const CONFIG_HOME_ENV: &str = "MLSTUDIO_CONFIG_HOME";

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.mlstudio` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    root_under(base)
}

/// Return the logs directory inside the `.mlstudio` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

fn root_under(base: PathBuf) -> Result<PathBuf, AppDirError> {
    ensure_dir(base.join(APP_DIR_NAME))
}

fn config_base_dir() -> Option<PathBuf> {
    match std::env::var(CONFIG_HOME_ENV) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()),
    }
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
