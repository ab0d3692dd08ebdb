//! src/errors.rs

use std::path::PathBuf;

use thiserror::Error;

/// Failures a single husky-conf invocation can report to the user.
#[derive(Debug, Error)]
pub enum HuskyConfError {
    #[error("Invalid hook: {0}")]
    InvalidHook(String),

    #[error("Command not valid: {0}")]
    InvalidCommand(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Failed to read {}: {message}", path.display())]
    ManifestRead { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    ManifestWrite { path: PathBuf, message: String },

    #[error("Failed to load config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to install {package}: {message}")]
    DependencyInstall { package: String, message: String },
}

pub type Result<T> = std::result::Result<T, HuskyConfError>;
