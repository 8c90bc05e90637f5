//! Storage errors.

use shopcfg_types::ErrorCode;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure reading or writing a configuration document.
///
/// [`NotFound`](StorageError::NotFound) is the only recoverable condition:
/// it tells the caller the layer is absent. Every other variant means the
/// medium or the file content is broken.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document does not exist.
    #[error("configuration document '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// Failed to read the document.
    #[error("failed to read configuration document '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("failed to parse configuration document '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document tree could not be rendered as YAML.
    #[error("failed to serialize configuration document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Failed to write the document.
    #[error("failed to write configuration document '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the directory holding the document.
    #[error("failed to create configuration directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete the document.
    #[error("failed to remove configuration document '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to enumerate a configuration directory.
    #[error("failed to list configuration directory '{}': {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Creates a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a read error, mapping `ErrorKind::NotFound` to [`Self::NotFound`].
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Read { path, source }
    }

    /// Creates a parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a create dir error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a remove error, mapping `ErrorKind::NotFound` to [`Self::NotFound`].
    pub fn remove(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Remove { path, source }
    }

    /// Creates a list dir error.
    pub fn list_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ListDir {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The document or directory the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Write { path, .. }
            | Self::CreateDir { path, .. }
            | Self::Remove { path, .. }
            | Self::ListDir { path, .. } => Some(path),
            Self::Serialize(_) => None,
        }
    }
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "STORAGE_NOT_FOUND",
            Self::Read { .. } => "STORAGE_READ_FAILED",
            Self::Parse { .. } => "STORAGE_PARSE_FAILED",
            Self::Serialize(_) => "STORAGE_SERIALIZE_FAILED",
            Self::Write { .. } => "STORAGE_WRITE_FAILED",
            Self::CreateDir { .. } => "STORAGE_CREATE_DIR_FAILED",
            Self::Remove { .. } => "STORAGE_REMOVE_FAILED",
            Self::ListDir { .. } => "STORAGE_LIST_DIR_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Parse { .. } | Self::Serialize(_))
    }
}
