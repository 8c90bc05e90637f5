//! Structured document persistence.
//!
//! A [`Document`] is a generic YAML tree. Storage does not interpret it;
//! the schema validator and the data mapper do.
//!
//! ```text
//! ShopConfigurationDao ──► DocumentStorage::load(path) ──► Document
//!                     ◄── StorageError::NotFound          (layer absent)
//! ```

mod error;
mod yaml;

pub use error::StorageError;
pub use yaml::YamlFileStorage;

use std::path::{Path, PathBuf};

/// Generic structured document: mapping, sequences, scalars.
pub type Document = serde_yaml::Value;

/// Persistence primitive for configuration documents, keyed by path.
///
/// Implementations must report a missing document as
/// [`StorageError::NotFound`] so callers can treat the layer as absent.
pub trait DocumentStorage: Send + Sync {
    /// Loads the document at `path`.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] if nothing is stored at `path`,
    /// [`StorageError::Parse`] if the content is not a valid document.
    fn load(&self, path: &Path) -> Result<Document, StorageError>;

    /// Stores `document` at `path`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document cannot be written.
    fn save(&self, path: &Path, document: &Document) -> Result<(), StorageError>;

    /// Deletes the document at `path`.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] if nothing is stored at `path`.
    fn remove(&self, path: &Path) -> Result<(), StorageError>;

    /// Lists stored documents directly inside `dir` with the given extension,
    /// sorted by path. A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ListDir`] if the directory exists but cannot be read.
    fn list(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, StorageError>;
}
