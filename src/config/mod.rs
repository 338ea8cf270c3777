//! Configuration management for bugdrop.
//!
//! Connection settings are stored as TOML in the platform config directory.
//! The API token is never written here - it lives in the OS keyring, managed
//! by [`crate::api::auth`].

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::Settings;

/// Environment variable overriding the config directory, mainly for tests.
const CONFIG_DIR_ENV: &str = "BUGDROP_CONFIG_DIR";

/// Name of the settings file inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not determine the platform config directory.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// No settings file exists yet.
    #[error("no configuration found: run 'bugdrop setup' first")]
    Missing,

    /// Failed to create the config directory.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    /// Failed to read the settings file.
    #[error("failed to read configuration: {0}")]
    ReadError(std::io::Error),

    /// Failed to write the settings file.
    #[error("failed to write configuration: {0}")]
    WriteError(std::io::Error),

    /// The settings file is not valid TOML.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The settings are structurally invalid.
    #[error("{0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The directory holding bugdrop's configuration.
///
/// Honors `BUGDROP_CONFIG_DIR` when set; otherwise the platform config
/// directory with `bugdrop` appended.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir()
        .map(|base| base.join("bugdrop"))
        .ok_or(ConfigError::NoConfigDir)
}

/// The path of the settings file.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}
