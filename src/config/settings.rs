//! Connection settings persisted between runs.

use serde::{Deserialize, Serialize};

use super::{config_dir, config_path, ConfigError, Result};
use crate::api::auth;

fn default_max_file_size_mb() -> u64 {
    100
}

/// The saved Jira connection settings.
///
/// The API token is deliberately absent: it is stored in the OS keyring
/// under the account email, so the settings file carries no secrets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// The account email used for API authentication.
    pub email: String,

    /// The Jira instance URL (e.g., "https://company.atlassian.net").
    pub url: String,

    /// Project keys the user has picked for quick issue creation.
    #[serde(default)]
    pub selected_projects: Vec<String>,

    /// Client-side attachment size cap in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email: String::new(),
            url: String::new(),
            selected_projects: Vec::new(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// Checks that the URL is non-empty with an http(s) scheme and the
    /// email is non-empty and plausibly an address.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "URL cannot be empty".to_string(),
            ));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "URL '{}' must start with http:// or https://",
                self.url
            )));
        }

        if self.email.is_empty() {
            return Err(ConfigError::ValidationError(
                "email cannot be empty".to_string(),
            ));
        }

        if !self.email.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "'{}' does not appear to be a valid email address",
                self.email
            )));
        }

        Ok(())
    }

    /// Whether enough configuration exists to attempt remote calls:
    /// non-empty email and URL, with a token stored for the account.
    pub fn is_configured(&self) -> bool {
        !self.email.is_empty() && !self.url.is_empty() && auth::has_token(&self.email)
    }

    /// The attachment size cap in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Load settings from the config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when no settings file exists yet.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Err(ConfigError::Missing);
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Save settings to the config file, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let dir = config_dir()?;
        std::fs::create_dir_all(&dir).map_err(ConfigError::CreateDirError)?;

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path()?, contents).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
