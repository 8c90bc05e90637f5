//! Configuration store errors.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`ShopConfigurationNotFound`](ConfigError::ShopConfigurationNotFound) | `CONFIG_SHOP_NOT_FOUND` | Yes |
//! | [`InvalidConfiguration`](ConfigError::InvalidConfiguration) | `CONFIG_INVALID` | No |
//! | [`Storage`](ConfigError::Storage) | `CONFIG_STORAGE` | Depends on the storage error |
//!
//! Callers branch on the first two: a missing shop means "configure the
//! shop", an invalid one means "fix the file".

use crate::schema::SchemaError;
use crate::storage::StorageError;
use shopcfg_types::{ErrorCode, ShopId};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error returned by the configuration DAOs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No base document exists for the shop.
    #[error("shop configuration for shop {shop_id} not found")]
    ShopConfigurationNotFound { shop_id: ShopId },

    /// A base or environment document exists but violates the schema.
    #[error("invalid shop configuration in '{}': {source}", path.display())]
    InvalidConfiguration {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// The storage medium failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ConfigError {
    /// Creates a shop-not-found error.
    pub fn shop_not_found(shop_id: ShopId) -> Self {
        Self::ShopConfigurationNotFound { shop_id }
    }

    /// Creates an invalid configuration error.
    pub fn invalid(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        Self::InvalidConfiguration {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for [`ShopConfigurationNotFound`](Self::ShopConfigurationNotFound).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ShopConfigurationNotFound { .. })
    }

    /// Returns `true` for [`InvalidConfiguration`](Self::InvalidConfiguration).
    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// The schema violation, for invalid configurations.
    #[must_use]
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::InvalidConfiguration { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The document the error refers to, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ShopConfigurationNotFound { .. } => None,
            Self::InvalidConfiguration { path, .. } => Some(path),
            Self::Storage(err) => err.path(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ShopConfigurationNotFound { .. } => "CONFIG_SHOP_NOT_FOUND",
            Self::InvalidConfiguration { .. } => "CONFIG_INVALID",
            Self::Storage(_) => "CONFIG_STORAGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::ShopConfigurationNotFound { .. } => true,
            Self::InvalidConfiguration { .. } => false,
            Self::Storage(err) => err.is_recoverable(),
        }
    }
}
