//! Configuration management for the account-sync CLI.
//!
//! The configuration is stored in TOML format and names the GitHub API to talk
//! to and the directory holding the account records. It can be loaded from a
//! specified file path or from the default location in the current directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "account-sync.toml";

/// Default directory for account records
pub const DEFAULT_STORAGE_DIRECTORY: &str = "./accounts";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the account-sync CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// [github]
/// api_url = "https://github.example.com/api/v3"
///
/// [storage]
/// directory = "/var/lib/account-sync"
/// ```
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The specified file does not exist
    /// - The file cannot be read due to permissions or I/O issues
    /// - The file contains invalid TOML syntax
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use account_sync_cli::config::AppConfig;
    ///
    /// let config_path = Path::new("./account-sync.toml");
    /// match AppConfig::load(config_path) {
    ///     Ok(config) => println!("Using {}", config.github.api_url),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration the CLI should run with.
    ///
    /// An explicitly given path must exist. Without one, the default file in
    /// the current directory is used when present, and the built-in defaults
    /// otherwise.
    pub fn resolve(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);
        if config_path.is_none() && !path.exists() {
            debug!(path = ?path, "No configuration file, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Saves the configuration to a TOML file at the specified path.
    ///
    /// Creates parent directories if they don't exist and overwrites an
    /// existing file.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

/// GitHub connection settings.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "GitHubConfig::default_api_url")]
    pub api_url: String,
}

impl GitHubConfig {
    fn default_api_url() -> String {
        github_client::DEFAULT_API_URL.to_string()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
        }
    }
}

/// Account record storage settings.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per account
    #[serde(default = "StorageConfig::default_directory")]
    pub directory: PathBuf,
}

impl StorageConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from(DEFAULT_STORAGE_DIRECTORY)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// # Behaviour
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./account-sync.toml` in the current directory
/// - Falls back to the current directory if unable to determine the working directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
