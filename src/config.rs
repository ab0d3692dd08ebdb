//! src/config.rs

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::errors::{HuskyConfError, Result};

/// Returns the configuration file path (~/.config/husky-conf/config.toml).
/// Nothing is created; a missing file means defaults.
pub fn get_config_path() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        // Windows: %APPDATA%\husky-conf
        dirs::data_dir()
    } else {
        // Linux/macOS: ~/.config/husky-conf
        dirs::config_dir()
    };
    base.map(|p| p.join("husky-conf").join("config.toml"))
}

/// Represents the main configuration for the application.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Manifest file name, relative to the working directory.
    pub manifest: String,
    /// Package manager placed in front of generated commands (e.g. "npm").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner: Option<String>,
    /// How the husky package gets installed when it is missing.
    pub install: InstallConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InstallConfig {
    /// Set to false to never run the package manager.
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    /// The hook runner package looked up in the manifest and installed.
    pub package: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: "package.json".to_string(),
            runner: None,
            install: InstallConfig::default(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "npm".to_string(),
            args: vec!["install".to_string(), "--save-dev".to_string()],
            package: "husky".to_string(),
        }
    }
}

impl Config {
    /// Resolves the manifest location: an explicit path wins, otherwise the
    /// configured file name inside `cwd`.
    pub fn manifest_path(&self, cwd: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => cwd.join(path),
            None => cwd.join(&self.manifest),
        }
    }
}

/// Loads the user configuration, falling back to defaults when there is none.
pub async fn load_config() -> Result<Config> {
    match get_config_path() {
        Some(path) => load_config_from(&path).await,
        None => {
            debug!("No config directory on this platform, using defaults");
            Ok(Config::default())
        }
    }
}

pub async fn load_config_from(path: &Path) -> Result<Config> {
    let config_error = |message: String| HuskyConfError::Config {
        path: path.to_path_buf(),
        message,
    };

    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!("{} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(path)
        .await
        .map_err(|e| config_error(e.to_string()))?;
    let config: Config =
        toml::from_str(&config_content).map_err(|e| config_error(e.message().to_string()))?;

    debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
