//! Shop module configuration runtime.
//!
//! Stores the module configuration of every shop as one YAML document per
//! shop, optionally overlaid by a per-deployment environment document, and
//! hands out cached, identity-stable snapshots.
//!
//! # Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  dao/          : ShopConfigurationDao (load, merge, cache)  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  environment/  : override documents, apply_overrides        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  mapper/       : Document ⇄ ShopConfiguration               │
//! │  schema        : Document → ValidatedDocument | SchemaError │
//! ├─────────────────────────────────────────────────────────────┤
//! │  storage/      : DocumentStorage, YamlFileStorage           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Errors
//!
//! | Situation | Error |
//! |-----------|-------|
//! | No `shops/<id>.yaml` | [`ConfigError::ShopConfigurationNotFound`] |
//! | Document has the wrong shape | [`ConfigError::InvalidConfiguration`] |
//! | Unreadable file, broken YAML | [`ConfigError::Storage`] |
//!
//! A missing environment document is not an error.
//!
//! # Example
//!
//! ```
//! use shopcfg_runtime::config::ProjectContext;
//! use shopcfg_runtime::dao::ShopConfigurationDao;
//! use shopcfg_runtime::model::{ModuleConfiguration, Setting, ShopConfiguration};
//! use shopcfg_types::ShopId;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let dao = ShopConfigurationDao::new(ProjectContext::new(dir.path()));
//! let shop = ShopId::new(1).ok_or("invalid shop id")?;
//!
//! let config = ShopConfiguration::new().with_module_configuration(
//!     ModuleConfiguration::new("payment", "vendor/payment")
//!         .with_module_setting(Setting::new("mode", "sandbox")),
//! );
//! dao.save(config.clone(), shop)?;
//!
//! assert_eq!(*dao.get(shop)?, config);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dao;
pub mod environment;
pub mod mapper;
pub mod model;
pub mod schema;
pub mod storage;

pub use config::{ConfigError, ProjectContext};
pub use dao::{ShopConfigurationDao, ShopConfigurationDaoBuilder};
pub use environment::{apply_overrides, ConfigResolver, ShopEnvironmentConfigurationDao};
pub use model::{ModuleConfiguration, Setting, SettingType, ShopConfiguration};
pub use schema::{validate, SchemaError, ValidatedDocument};
pub use storage::{Document, DocumentStorage, StorageError, YamlFileStorage};
