//! src/manifest.rs
//!
//! Loading and saving of `package.json`. Objects keep their key order so that
//! everything husky-conf does not touch is written back as it was read.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::errors::{HuskyConfError, Result};

/// Top-level key holding npm scripts.
pub const SCRIPTS_KEY: &str = "scripts";
/// Top-level key holding husky configuration.
pub const HUSKY_KEY: &str = "husky";
/// Key under `husky` holding the hook bindings.
pub const HOOKS_KEY: &str = "hooks";

/// Written by some npm versions when reading the manifest; never persisted.
const NPM_ID_KEY: &str = "_id";

const DEPENDENCY_KEYS: [&str; 2] = ["dependencies", "devDependencies"];

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Manifest {
    pub fn new(path: impl Into<PathBuf>, root: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let read_error = |message: String| HuskyConfError::ManifestRead {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| read_error(e.to_string()))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| read_error(e.to_string()))?;

        match value {
            Value::Object(root) => {
                debug!("Loaded manifest {} ({} keys)", path.display(), root.len());
                Ok(Self::new(path, root))
            }
            _ => Err(read_error("top-level value is not a JSON object".to_string())),
        }
    }

    /// Writes the manifest to a temporary file next to the real one and
    /// persists it over the original, so a failed write leaves the previous
    /// content in place. Symlinks are followed and permissions kept.
    pub async fn save(&self) -> Result<()> {
        let write_error = |message: String| HuskyConfError::ManifestWrite {
            path: self.path.clone(),
            message,
        };

        let mut root = self.root.clone();
        root.shift_remove(NPM_ID_KEY);

        let mut content = serde_json::to_string_pretty(&Value::Object(root))
            .map_err(|e| write_error(e.to_string()))?;
        content.push('\n');

        let path = self.path.clone();
        let target = tokio::task::spawn_blocking(move || write_atomic(&path, content.as_bytes()))
            .await
            .map_err(|e| write_error(e.to_string()))?
            .map_err(|e| write_error(e.to_string()))?;

        debug!("Saved manifest {}", target.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// True when `name` is declared in `dependencies` or `devDependencies`.
    pub fn has_dependency(&self, name: &str) -> bool {
        DEPENDENCY_KEYS.iter().any(|key| {
            self.root
                .get(*key)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(name))
        })
    }
}

/// Returns the file that was actually written.
fn write_atomic(path: &Path, content: &[u8]) -> io::Result<PathBuf> {
    let target = match std::fs::canonicalize(path) {
        Ok(target) => target,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e),
    };
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    if let Ok(metadata) = std::fs::metadata(&target) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    Ok(target)
}
