//! Environment override layer.
//!
//! A deployment may place `environment/<shopId>.yaml` next to the base
//! documents to change setting values without touching the installed
//! configuration. Overrides never add modules.

mod dao;
mod merge;
mod resolver;

pub use dao::ShopEnvironmentConfigurationDao;
pub use merge::apply_overrides;
pub use resolver::{ConfigResolver, EnvironmentResolver, NoOpResolver};
