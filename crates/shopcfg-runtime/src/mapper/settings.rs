//! `moduleSettings` block of a module entry.

use super::keys;
use crate::model::{ModuleConfiguration, Setting, SettingType};
use serde_yaml::{Mapping, Value};

/// Maps the settings block of a module entry to and from [`Setting`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleSettingsMapper;

impl ModuleSettingsMapper {
    /// Key of the settings block under each module entry.
    pub const MAPPING_KEY: &'static str = keys::MODULE_SETTINGS;

    /// Adds the settings found in a validated module entry to `module`.
    ///
    /// Entries that are not mappings are skipped; the validator rejects them
    /// before they reach the mapper.
    pub fn to_domain(&self, entry: &Mapping, module: &mut ModuleConfiguration) {
        let Some(Value::Mapping(settings)) = entry.get(Self::MAPPING_KEY) else {
            return;
        };

        for (name, attributes) in settings {
            let (Some(name), Value::Mapping(attributes)) = (name.as_str(), attributes) else {
                continue;
            };
            module.add_module_setting(setting_from_attributes(name, attributes));
        }
    }

    /// Writes the settings of `module` into `entry`.
    pub fn to_document(&self, module: &ModuleConfiguration, entry: &mut Mapping) {
        let mut settings = Mapping::new();
        for setting in module.module_settings() {
            settings.insert(
                Value::from(setting.name()),
                Value::Mapping(attributes_from_setting(setting)),
            );
        }
        entry.insert(Value::from(Self::MAPPING_KEY), Value::Mapping(settings));
    }
}

fn setting_from_attributes(name: &str, attributes: &Mapping) -> Setting {
    let value = attributes.get(keys::VALUE).cloned().unwrap_or(Value::Null);

    let setting_type = attributes
        .get(keys::TYPE)
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<SettingType>().ok())
        .unwrap_or_else(|| SettingType::infer(&value));

    let mut setting = Setting::new(name, value).with_type(setting_type);

    if let Some(group) = attributes.get(keys::GROUP).and_then(Value::as_str) {
        setting = setting.with_group(group);
    }
    if let Some(position) = attributes.get(keys::POSITION).and_then(Value::as_i64) {
        setting = setting.with_position(position);
    }
    if let Some(Value::Sequence(items)) = attributes.get(keys::CONSTRAINTS) {
        setting = setting.with_constraints(items.iter().filter_map(Value::as_str));
    }

    setting
}

fn attributes_from_setting(setting: &Setting) -> Mapping {
    let mut attributes = Mapping::new();
    attributes.insert(
        Value::from(keys::TYPE),
        Value::from(setting.setting_type().as_str()),
    );
    attributes.insert(Value::from(keys::VALUE), setting.value().clone());

    if let Some(group) = setting.group() {
        attributes.insert(Value::from(keys::GROUP), Value::from(group));
    }
    if let Some(position) = setting.position() {
        attributes.insert(Value::from(keys::POSITION), Value::from(position));
    }
    if !setting.constraints().is_empty() {
        attributes.insert(
            Value::from(keys::CONSTRAINTS),
            Value::Sequence(
                setting
                    .constraints()
                    .iter()
                    .map(|c| Value::from(c.as_str()))
                    .collect(),
            ),
        );
    }

    attributes
}
