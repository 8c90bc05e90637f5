//! Resolver seam between the base layer and the final configuration.
//!
//! ```text
//! ShopConfigurationDao.get()  →  ShopConfiguration (base)
//!                                      │
//!                                      ▼
//!                           ConfigResolver.resolve()
//!                                      │
//!                                      ▼
//!                          ShopConfiguration (final, cached)
//! ```

use super::{apply_overrides, ShopEnvironmentConfigurationDao};
use crate::config::ConfigError;
use crate::model::ShopConfiguration;
use shopcfg_types::ShopId;

/// Turns a freshly loaded base configuration into the configuration callers see.
pub trait ConfigResolver: Send + Sync {
    /// Resolves the configuration of `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an override layer exists but cannot be used.
    fn resolve(
        &self,
        shop_id: ShopId,
        base: ShopConfiguration,
    ) -> Result<ShopConfiguration, ConfigError>;
}

/// Resolver that returns the base unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn resolve(
        &self,
        _shop_id: ShopId,
        base: ShopConfiguration,
    ) -> Result<ShopConfiguration, ConfigError> {
        Ok(base)
    }
}

/// Resolver applying `environment/<shopId>.yaml` on top of the base.
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    environment: ShopEnvironmentConfigurationDao,
}

impl EnvironmentResolver {
    #[must_use]
    pub fn new(environment: ShopEnvironmentConfigurationDao) -> Self {
        Self { environment }
    }
}

impl ConfigResolver for EnvironmentResolver {
    fn resolve(
        &self,
        shop_id: ShopId,
        base: ShopConfiguration,
    ) -> Result<ShopConfiguration, ConfigError> {
        let overrides = self.environment.get(shop_id)?;
        Ok(apply_overrides(base, overrides.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectContext;
    use crate::model::{ModuleConfiguration, Setting};
    use crate::storage::YamlFileStorage;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn shop(id: u32) -> ShopId {
        ShopId::new(id).expect("test shop ids are positive")
    }

    fn base() -> ShopConfiguration {
        ShopConfiguration::new().with_module_configuration(
            ModuleConfiguration::new("m", "m").with_module_setting(Setting::new("s", "original")),
        )
    }

    #[test]
    fn noop_resolver_does_nothing() {
        let resolved = NoOpResolver
            .resolve(shop(1), base())
            .expect("noop resolver never fails");
        assert_eq!(resolved, base());
    }

    #[test]
    fn environment_resolver_without_file_returns_base() {
        let temp = TempDir::new().expect("should create temp dir for resolver test");
        let resolver = EnvironmentResolver::new(ShopEnvironmentConfigurationDao::new(
            ProjectContext::new(temp.path()),
            Arc::new(YamlFileStorage::new()),
        ));

        let resolved = resolver
            .resolve(shop(1), base())
            .expect("missing env file is not an error");
        assert_eq!(resolved, base());
    }

    #[test]
    fn custom_resolver() {
        struct ForceSetting(&'static str);

        impl ConfigResolver for ForceSetting {
            fn resolve(
                &self,
                _shop_id: ShopId,
                mut base: ShopConfiguration,
            ) -> Result<ShopConfiguration, ConfigError> {
                if let Some(setting) = base
                    .module_configuration_mut("m")
                    .and_then(|m| m.module_setting_mut("s"))
                {
                    setting.set_value(self.0);
                }
                Ok(base)
            }
        }

        let resolved = ForceSetting("forced")
            .resolve(shop(1), base())
            .expect("custom resolver should succeed");
        let value = resolved
            .module_configuration("m")
            .and_then(|m| m.module_setting("s"))
            .and_then(|s| s.value().as_str());
        assert_eq!(value, Some("forced"));
    }
}
