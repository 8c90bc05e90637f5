//! YAML files on the local filesystem.

use super::{Document, DocumentStorage, StorageError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`DocumentStorage`] backed by one YAML file per document.
///
/// Parent directories are created on save. An empty file loads as an
/// empty mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileStorage;

impl YamlFileStorage {
    /// Creates the storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStorage for YamlFileStorage {
    fn load(&self, path: &Path) -> Result<Document, StorageError> {
        let content = std::fs::read_to_string(path).map_err(|e| StorageError::read(path, e))?;

        if content.trim().is_empty() {
            debug!(path = %path.display(), "Loaded empty configuration document");
            return Ok(Document::Mapping(serde_yaml::Mapping::new()));
        }

        let document: Document =
            serde_yaml::from_str(&content).map_err(|e| StorageError::parse(path, e))?;

        debug!(path = %path.display(), "Loaded configuration document");
        Ok(document)
    }

    fn save(&self, path: &Path, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::create_dir(parent, e))?;
            }
        }

        let yaml = serde_yaml::to_string(document)?;
        std::fs::write(path, yaml).map_err(|e| StorageError::write(path, e))?;

        debug!(path = %path.display(), "Saved configuration document");
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), StorageError> {
        std::fs::remove_file(path).map_err(|e| StorageError::remove(path, e))?;
        debug!(path = %path.display(), "Removed configuration document");
        Ok(())
    }

    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, StorageError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let read_dir = std::fs::read_dir(dir).map_err(|e| StorageError::list_dir(dir, e))?;

        let mut paths: Vec<PathBuf> = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
            .collect();
        paths.sort();

        Ok(paths)
    }
}
