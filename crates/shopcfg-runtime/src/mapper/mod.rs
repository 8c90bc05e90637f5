//! Transformation between documents and the configuration object graph.
//!
//! ```text
//! Document ──validate──► ValidatedDocument ──to_domain──► ShopConfiguration
//!    ▲                                                          │
//!    └──────────────────────── to_document ◄────────────────────┘
//! ```
//!
//! For any configuration `x`,
//! `to_domain(validate(to_document(&x))?) == x`.

pub mod keys;
mod settings;

pub use settings::ModuleSettingsMapper;

use crate::model::{ModuleConfiguration, ShopConfiguration};
use crate::schema::ValidatedDocument;
use crate::storage::Document;
use serde_yaml::{Mapping, Value};

/// Maps whole shop configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShopConfigurationMapper {
    settings: ModuleSettingsMapper,
}

impl ShopConfigurationMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the object graph from a validated document.
    #[must_use]
    pub fn to_domain(&self, document: ValidatedDocument) -> ShopConfiguration {
        let root = document.into_root();
        let mut shop = ShopConfiguration::new();

        for (key, value) in root {
            if key.as_str() != Some(keys::MODULES) {
                shop.extensions_mut().insert(key, value);
                continue;
            }
            if let Value::Mapping(modules) = value {
                for (id, entry) in &modules {
                    if let Some(module) = self.module_to_domain(id, entry) {
                        shop.add_module_configuration(module);
                    }
                }
            }
        }

        shop
    }

    /// Renders the object graph as a document.
    #[must_use]
    pub fn to_document(&self, shop: &ShopConfiguration) -> Document {
        let mut modules = Mapping::new();
        for module in shop.module_configurations() {
            modules.insert(
                Value::from(module.id()),
                Value::Mapping(self.module_to_document(module)),
            );
        }

        let mut root = Mapping::new();
        root.insert(Value::from(keys::MODULES), Value::Mapping(modules));
        for (key, value) in shop.extensions() {
            if key.as_str() != Some(keys::MODULES) {
                root.insert(key.clone(), value.clone());
            }
        }

        Value::Mapping(root)
    }

    fn module_to_domain(&self, id: &Value, entry: &Value) -> Option<ModuleConfiguration> {
        let id = id.as_str().filter(|id| !id.is_empty())?;
        let empty = Mapping::new();
        let entry = entry.as_mapping().unwrap_or(&empty);

        let path = entry.get(keys::PATH).and_then(Value::as_str).unwrap_or("");
        let mut module = ModuleConfiguration::new(id, path);

        self.settings.to_domain(entry, &mut module);

        for (key, value) in entry {
            let is_extension = key
                .as_str()
                .is_some_and(|k| keys::MODULE_EXTENSIONS.contains(&k));
            if is_extension {
                module.extensions_mut().insert(key.clone(), value.clone());
            }
        }

        Some(module)
    }

    fn module_to_document(&self, module: &ModuleConfiguration) -> Mapping {
        let mut entry = Mapping::new();
        entry.insert(Value::from(keys::ID), Value::from(module.id()));
        entry.insert(Value::from(keys::PATH), Value::from(module.path()));
        for (key, value) in module.extensions() {
            let reserved = key
                .as_str()
                .is_some_and(|k| keys::MODULE_RESERVED.contains(&k));
            if !reserved {
                entry.insert(key.clone(), value.clone());
            }
        }
        self.settings.to_document(module, &mut entry);
        entry
    }
}
