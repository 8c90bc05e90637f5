//! Shop configuration store.
//!
//! Every read of a shop's module configuration goes through
//! [`ShopConfigurationDao`]:
//!
//! ```text
//! get(id) ─► cache hit? ──yes──► same Arc
//!                │ no
//!                ▼
//!     shops/<id>.yaml ─► validate ─► to_domain ─► resolver (environment/<id>.yaml)
//!                                                      │
//!                                                      ▼
//!                                              cache + return Arc
//! ```
//!
//! `save` writes the base document and caches the saved instance as is.
//! The environment layer is never written.

use crate::config::{shop_id_from_path, ConfigError, ProjectContext, CONFIG_FILE_EXTENSION};
use crate::environment::{
    ConfigResolver, EnvironmentResolver, NoOpResolver, ShopEnvironmentConfigurationDao,
};
use crate::mapper::ShopConfigurationMapper;
use crate::model::ShopConfiguration;
use crate::schema::validate;
use crate::storage::{DocumentStorage, StorageError, YamlFileStorage};
use parking_lot::Mutex;
use shopcfg_types::ShopId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

type Cache = HashMap<ShopId, Arc<ShopConfiguration>>;

/// Per-shop configuration store with an identity-preserving cache.
///
/// # Identity
///
/// Repeated [`get`](Self::get) calls for a shop return the same
/// [`Arc`] (compare with [`Arc::ptr_eq`]) until the next
/// [`save`](Self::save) for that shop or [`delete_all`](Self::delete_all).
///
/// # Concurrency
///
/// One mutex guards the cache for the whole of each operation, so a reader
/// never observes a half-merged configuration and a concurrent `save`
/// cannot be overwritten by a stale load.
///
/// # Example
///
/// ```
/// use shopcfg_runtime::config::ProjectContext;
/// use shopcfg_runtime::dao::ShopConfigurationDao;
/// use shopcfg_runtime::model::ShopConfiguration;
/// use shopcfg_types::ShopId;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let dao = ShopConfigurationDao::new(ProjectContext::new(dir.path()));
/// let shop = ShopId::new(1).ok_or("invalid shop id")?;
///
/// dao.save(ShopConfiguration::new(), shop)?;
///
/// let first = dao.get(shop)?;
/// let second = dao.get(shop)?;
/// assert!(Arc::ptr_eq(&first, &second));
/// # Ok(())
/// # }
/// ```
pub struct ShopConfigurationDao {
    context: ProjectContext,
    storage: Arc<dyn DocumentStorage>,
    resolver: Box<dyn ConfigResolver>,
    mapper: ShopConfigurationMapper,
    cache: Mutex<Cache>,
}

impl ShopConfigurationDao {
    /// Creates a store reading YAML files under `context` with environment
    /// overrides enabled.
    #[must_use]
    pub fn new(context: ProjectContext) -> Self {
        Self::builder(context).build()
    }

    /// Starts a builder for a customised store.
    #[must_use]
    pub fn builder(context: ProjectContext) -> ShopConfigurationDaoBuilder {
        ShopConfigurationDaoBuilder::new(context)
    }

    #[must_use]
    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    /// Persists `config` as the base configuration of `shop_id`.
    ///
    /// The cache entry for `shop_id` becomes exactly the `Arc` passed in,
    /// so a following [`get`](Self::get) on this store returns it without
    /// applying the environment layer. [`invalidate`](Self::invalidate)
    /// the shop to read it back with overrides.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidConfiguration`] if the rendered document would
    ///   not load again, e.g. an unknown key in [`ShopConfiguration::extensions`].
    /// - [`ConfigError::Storage`] if the document cannot be written.
    ///
    /// Nothing is written and the cache is left untouched on error.
    pub fn save(
        &self,
        config: impl Into<Arc<ShopConfiguration>>,
        shop_id: ShopId,
    ) -> Result<(), ConfigError> {
        let config = config.into();
        let path = self.context.shop_file(shop_id);
        let document = self.mapper.to_document(&config);
        validate(document.clone()).map_err(|e| ConfigError::invalid(&path, e))?;

        let mut cache = self.cache.lock();
        self.storage.save(&path, &document)?;
        cache.insert(shop_id, config);

        debug!(shop_id = %shop_id, path = %path.display(), "Saved shop configuration");
        Ok(())
    }

    /// Returns the resolved configuration of `shop_id`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ShopConfigurationNotFound`] if no base document exists.
    /// - [`ConfigError::InvalidConfiguration`] if the base or environment
    ///   document violates the schema.
    /// - [`ConfigError::Storage`] if a document cannot be read or parsed.
    pub fn get(&self, shop_id: ShopId) -> Result<Arc<ShopConfiguration>, ConfigError> {
        let mut cache = self.cache.lock();
        self.get_cached(&mut cache, shop_id)
    }

    /// Returns the resolved configuration of every persisted shop, keyed by id.
    ///
    /// # Errors
    ///
    /// Fails on the first shop that [`get`](Self::get) would fail for.
    pub fn get_all(&self) -> Result<BTreeMap<ShopId, Arc<ShopConfiguration>>, ConfigError> {
        let mut cache = self.cache.lock();

        let mut all = BTreeMap::new();
        for shop_id in self.persisted_shop_ids()? {
            let config = self.get_cached(&mut cache, shop_id)?;
            all.insert(shop_id, config);
        }
        Ok(all)
    }

    /// Ids of all shops with a persisted base document, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Storage`] if the shops directory cannot be listed.
    pub fn shop_ids(&self) -> Result<Vec<ShopId>, ConfigError> {
        let _cache = self.cache.lock();
        self.persisted_shop_ids()
    }

    /// Removes every persisted base document and clears the cache.
    ///
    /// Environment documents are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Storage`] if a document cannot be removed.
    /// The cache is cleared even then.
    pub fn delete_all(&self) -> Result<(), ConfigError> {
        let mut cache = self.cache.lock();
        cache.clear();

        for shop_id in self.persisted_shop_ids()? {
            match self.storage.remove(&self.context.shop_file(shop_id)) {
                Ok(()) | Err(StorageError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
            debug!(shop_id = %shop_id, "Deleted shop configuration");
        }
        Ok(())
    }

    /// Drops the cached configuration of `shop_id`; the next `get` reloads it.
    pub fn invalidate(&self, shop_id: ShopId) {
        if self.cache.lock().remove(&shop_id).is_some() {
            debug!(shop_id = %shop_id, "Invalidated cached shop configuration");
        }
    }

    fn get_cached(
        &self,
        cache: &mut Cache,
        shop_id: ShopId,
    ) -> Result<Arc<ShopConfiguration>, ConfigError> {
        if let Some(config) = cache.get(&shop_id) {
            return Ok(Arc::clone(config));
        }

        let config = Arc::new(self.load(shop_id)?);
        cache.insert(shop_id, Arc::clone(&config));
        debug!(shop_id = %shop_id, "Cached shop configuration");
        Ok(config)
    }

    fn load(&self, shop_id: ShopId) -> Result<ShopConfiguration, ConfigError> {
        let path = self.context.shop_file(shop_id);

        let document = self.storage.load(&path).map_err(|e| match e {
            StorageError::NotFound { .. } => ConfigError::shop_not_found(shop_id),
            other => other.into(),
        })?;

        let validated = validate(document).map_err(|e| ConfigError::invalid(&path, e))?;
        let base = self.mapper.to_domain(validated);
        debug!(
            shop_id = %shop_id,
            modules = base.module_configurations().len(),
            "Loaded shop configuration"
        );

        self.resolver.resolve(shop_id, base)
    }

    fn persisted_shop_ids(&self) -> Result<Vec<ShopId>, ConfigError> {
        let shops_dir = self.context.shops_dir();
        let mut ids: Vec<ShopId> = self
            .storage
            .list(&shops_dir, CONFIG_FILE_EXTENSION)?
            .iter()
            .filter_map(|path| {
                let id = shop_id_from_path(path);
                if id.is_none() {
                    debug!(path = %path.display(), "Skipping non shop configuration file");
                }
                id
            })
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl std::fmt::Debug for ShopConfigurationDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopConfigurationDao")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ShopConfigurationDao`].
///
/// ```
/// use shopcfg_runtime::config::ProjectContext;
/// use shopcfg_runtime::dao::ShopConfigurationDao;
///
/// let dao = ShopConfigurationDao::builder(ProjectContext::new("/srv/shop/var/configuration"))
///     .skip_environment()
///     .build();
/// ```
#[must_use]
pub struct ShopConfigurationDaoBuilder {
    context: ProjectContext,
    storage: Option<Arc<dyn DocumentStorage>>,
    resolver: Option<Box<dyn ConfigResolver>>,
    skip_environment: bool,
}

impl ShopConfigurationDaoBuilder {
    fn new(context: ProjectContext) -> Self {
        Self {
            context,
            storage: None,
            resolver: None,
            skip_environment: false,
        }
    }

    /// Uses `storage` instead of [`YamlFileStorage`].
    pub fn with_storage(mut self, storage: Arc<dyn DocumentStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Uses `resolver` instead of the environment layer.
    pub fn with_resolver(mut self, resolver: Box<dyn ConfigResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Ignores environment documents.
    pub fn skip_environment(mut self) -> Self {
        self.skip_environment = true;
        self
    }

    #[must_use]
    pub fn build(self) -> ShopConfigurationDao {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(YamlFileStorage::new()));

        let resolver = match (self.resolver, self.skip_environment) {
            (Some(resolver), _) => resolver,
            (None, true) => Box::new(NoOpResolver) as Box<dyn ConfigResolver>,
            (None, false) => Box::new(EnvironmentResolver::new(
                ShopEnvironmentConfigurationDao::new(self.context.clone(), Arc::clone(&storage)),
            )),
        };

        ShopConfigurationDao {
            context: self.context,
            storage,
            resolver,
            mapper: ShopConfigurationMapper::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }
}
