//! Whole-shop configuration.

use super::ModuleConfiguration;
use serde_yaml::Mapping;

/// Every module configuration of one shop.
///
/// Module ids are unique. Order follows insertion and carries no meaning
/// beyond making documents stable across saves.
///
/// Instances handed out by
/// [`ShopConfigurationDao`](crate::dao::ShopConfigurationDao) are shared
/// snapshots; changing a clone does not persist anything until it is saved.
///
/// # Example
///
/// ```
/// use shopcfg_runtime::model::{ModuleConfiguration, Setting, ShopConfiguration};
///
/// let mut shop = ShopConfiguration::new();
/// shop.add_module_configuration(
///     ModuleConfiguration::new("payment", "vendor/payment")
///         .with_module_setting(Setting::new("mode", "sandbox")),
/// );
///
/// assert!(shop.has_module_configuration("payment"));
/// assert_eq!(shop.module_configurations().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopConfiguration {
    modules: Vec<ModuleConfiguration>,
    extensions: Mapping,
}

impl ShopConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module, replacing any existing module with the same id in place.
    pub fn add_module_configuration(&mut self, module: ModuleConfiguration) -> &mut Self {
        match self.modules.iter_mut().find(|m| m.id() == module.id()) {
            Some(existing) => *existing = module,
            None => self.modules.push(module),
        }
        self
    }

    /// Builder-style [`add_module_configuration`](Self::add_module_configuration).
    #[must_use]
    pub fn with_module_configuration(mut self, module: ModuleConfiguration) -> Self {
        self.add_module_configuration(module);
        self
    }

    #[must_use]
    pub fn module_configuration(&self, id: &str) -> Option<&ModuleConfiguration> {
        self.modules.iter().find(|m| m.id() == id)
    }

    pub fn module_configuration_mut(&mut self, id: &str) -> Option<&mut ModuleConfiguration> {
        self.modules.iter_mut().find(|m| m.id() == id)
    }

    #[must_use]
    pub fn has_module_configuration(&self, id: &str) -> bool {
        self.module_configuration(id).is_some()
    }

    /// Removes and returns the module with `id`.
    pub fn remove_module_configuration(&mut self, id: &str) -> Option<ModuleConfiguration> {
        let index = self.modules.iter().position(|m| m.id() == id)?;
        Some(self.modules.remove(index))
    }

    #[must_use]
    pub fn module_configurations(&self) -> &[ModuleConfiguration] {
        &self.modules
    }

    /// Uninterpreted top-level blocks (`moduleChains`).
    #[must_use]
    pub fn extensions(&self) -> &Mapping {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Mapping {
        &mut self.extensions
    }
}
