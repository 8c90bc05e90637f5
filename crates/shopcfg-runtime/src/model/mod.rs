//! Configuration object graph.
//!
//! ```text
//! ShopConfiguration 1──* ModuleConfiguration 1──* Setting
//! ```
//!
//! Ownership is exclusive: a shop owns its modules, a module owns its
//! settings. Nothing is shared across shops.

mod module;
mod setting;
mod shop;

pub use module::ModuleConfiguration;
pub use setting::{Setting, SettingType, UnknownSettingType};
pub use shop::ShopConfiguration;
