//! Environment override documents.

use crate::config::{ConfigError, ProjectContext};
use crate::mapper::ShopConfigurationMapper;
use crate::model::ShopConfiguration;
use crate::schema::validate;
use crate::storage::{DocumentStorage, StorageError};
use shopcfg_types::ShopId;
use std::sync::Arc;
use tracing::debug;

/// Reads and removes `environment/<shopId>.yaml`.
///
/// The override layer is optional: a missing document is `Ok(None)`, never
/// an error. A document that exists but is malformed is an error.
#[derive(Clone)]
pub struct ShopEnvironmentConfigurationDao {
    context: ProjectContext,
    storage: Arc<dyn DocumentStorage>,
    mapper: ShopConfigurationMapper,
}

impl ShopEnvironmentConfigurationDao {
    #[must_use]
    pub fn new(context: ProjectContext, storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            context,
            storage,
            mapper: ShopConfigurationMapper::new(),
        }
    }

    /// Loads the override configuration of `shop_id`, if any.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidConfiguration`] if the document violates the
    /// schema, [`ConfigError::Storage`] if it cannot be read or parsed.
    pub fn get(&self, shop_id: ShopId) -> Result<Option<ShopConfiguration>, ConfigError> {
        let path = self.context.environment_file(shop_id);

        let document = match self.storage.load(&path) {
            Ok(document) => document,
            Err(StorageError::NotFound { .. }) => {
                debug!(shop_id = %shop_id, "No environment configuration");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let validated = validate(document).map_err(|e| ConfigError::invalid(&path, e))?;
        debug!(shop_id = %shop_id, path = %path.display(), "Loaded environment configuration");

        Ok(Some(self.mapper.to_domain(validated)))
    }

    /// Deletes the override document of `shop_id`. Missing documents are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Storage`] if the document exists but cannot be removed.
    pub fn remove(&self, shop_id: ShopId) -> Result<(), ConfigError> {
        match self.storage.remove(&self.context.environment_file(shop_id)) {
            Ok(()) | Err(StorageError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for ShopEnvironmentConfigurationDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopEnvironmentConfigurationDao")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
