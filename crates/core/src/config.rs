//! Application configuration.
//!
//! Values are layered: built-in defaults, then the optional JSON file under
//! the user's config directory, then `CARRENTAL_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Directory under `~/.config` holding the configuration file.
pub const CONFIG_DIR: &str = "carrental";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.json";
/// Prefix for environment overrides, e.g. `CARRENTAL_DATA_DIR`.
pub const ENV_PREFIX: &str = "CARRENTAL";

/// Runtime settings for the rental service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the account store and logs.
    pub data_dir: PathBuf,
    /// Fleet catalog file.
    pub catalog_path: PathBuf,
    /// File name of the account store inside `data_dir`.
    pub accounts_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("CarRentalApp"),
            catalog_path: PathBuf::from("List_of_Rental_Cars.txt"),
            accounts_file: "users.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration layered over the file at `path`, which may be absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, environment: Environment) -> Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to build default configuration")?;
        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Full path of the account store.
    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(&self.accounts_file)
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Default configuration file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default configuration to the default location if none exists.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_file(config_path())
}

/// Write the default configuration to `path` if it does not exist yet.
pub fn ensure_config_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default configuration")?;
    fs::write(path, serialized).with_context(|| format!("failed to write {}", path.display()))
}
