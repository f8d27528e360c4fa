//! Settings file for the config-updater CLI.
//!
//! The settings are stored in TOML and provide the default [`UpdateOptions`]
//! for every command. Command-line flags override individual options.

use std::{
    fs,
    path::{Path, PathBuf},
};

use config_updater::UpdateOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

/// Default settings file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "config-updater.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings for the config-updater CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// [options]
/// deep_merge = false
/// default_content = "{}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default update options.
    #[serde(default)]
    pub options: UpdateOptions,
}

impl AppConfig {
    /// Loads settings from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read or
    /// is not valid TOML for this structure.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use config_updater_cli::config::AppConfig;
    ///
    /// match AppConfig::load(Path::new("./config-updater.toml")) {
    ///     Ok(config) => println!("Deep merge: {}", config.options.deep_merge),
    ///     Err(e) => eprintln!("Failed to load settings: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading settings from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!("Settings file not found: {:?}", path)));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Loads the settings a command should run with.
    ///
    /// An explicitly named file must exist. Without one, the default file in
    /// the current directory is used when present and built-in defaults
    /// otherwise.
    pub fn resolve(settings_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(settings_path);
        if settings_path.is_none() && !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

/// Resolves the settings file path: the given path, or
/// `./config-updater.toml`.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
