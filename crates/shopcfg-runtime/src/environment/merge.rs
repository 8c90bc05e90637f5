//! Two-layer merge of base and environment configurations.

use crate::model::{Setting, ShopConfiguration};
use tracing::{debug, warn};

/// Applies environment overrides to a base configuration.
///
/// - `None` returns `base` untouched.
/// - For modules present in both layers, every override setting replaces
///   the base value. Type, group, position and constraints of an existing
///   base setting are kept; settings missing from the base are inserted
///   as the override defines them.
/// - Modules present only in the override are ignored. Whether a module
///   belongs to a shop is decided by the base layer alone.
///
/// # Example
///
/// ```
/// use shopcfg_runtime::environment::apply_overrides;
/// use shopcfg_runtime::model::{ModuleConfiguration, Setting, ShopConfiguration};
///
/// let base = ShopConfiguration::new().with_module_configuration(
///     ModuleConfiguration::new("m", "m").with_module_setting(Setting::new("s", "original")),
/// );
/// let overrides = ShopConfiguration::new().with_module_configuration(
///     ModuleConfiguration::new("m", "").with_module_setting(Setting::new("s", "new")),
/// );
///
/// let merged = apply_overrides(base, Some(&overrides));
/// let value = merged
///     .module_configuration("m")
///     .and_then(|m| m.module_setting("s"))
///     .and_then(|s| s.value().as_str());
/// assert_eq!(value, Some("new"));
/// ```
#[must_use]
pub fn apply_overrides(
    mut base: ShopConfiguration,
    overrides: Option<&ShopConfiguration>,
) -> ShopConfiguration {
    let Some(overrides) = overrides else {
        return base;
    };

    for override_module in overrides.module_configurations() {
        let Some(module) = base.module_configuration_mut(override_module.id()) else {
            warn!(
                module_id = %override_module.id(),
                "Ignoring environment override for module missing from shop configuration"
            );
            continue;
        };

        for override_setting in override_module.module_settings() {
            match module.module_setting_mut(override_setting.name()) {
                Some(setting) => setting.set_value(override_setting.value().clone()),
                None => {
                    module.add_module_setting(Setting::clone(override_setting));
                }
            }
        }

        debug!(
            module_id = %override_module.id(),
            settings = override_module.module_settings().len(),
            "Applied environment overrides"
        );
    }

    base
}
