//! Per-module configuration.

use super::Setting;
use serde_yaml::Mapping;

/// Configuration of one installed module within a shop.
///
/// Settings keep insertion order; names are unique. Blocks the store does
/// not interpret (`version`, `title`, `classExtensions`, `templates`, ...)
/// travel through [`extensions`](Self::extensions) unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleConfiguration {
    id: String,
    path: String,
    settings: Vec<Setting>,
    extensions: Mapping,
}

impl ModuleConfiguration {
    /// Creates an empty module configuration.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty. A module without an id cannot be keyed in a
    /// shop configuration; this is a programming error, not a data error.
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "module configuration id must not be empty");
        Self {
            id,
            path: path.into(),
            settings: Vec::new(),
            extensions: Mapping::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Filesystem location of the module, relative to the modules directory.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Adds a setting, replacing any existing setting with the same name in place.
    pub fn add_module_setting(&mut self, setting: Setting) -> &mut Self {
        match self.settings.iter_mut().find(|s| s.name() == setting.name()) {
            Some(existing) => *existing = setting,
            None => self.settings.push(setting),
        }
        self
    }

    /// Builder-style [`add_module_setting`](Self::add_module_setting).
    #[must_use]
    pub fn with_module_setting(mut self, setting: Setting) -> Self {
        self.add_module_setting(setting);
        self
    }

    #[must_use]
    pub fn module_setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name() == name)
    }

    pub fn module_setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.settings.iter_mut().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn has_module_setting(&self, name: &str) -> bool {
        self.module_setting(name).is_some()
    }

    #[must_use]
    pub fn module_settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Uninterpreted module blocks, keyed by their document key.
    #[must_use]
    pub fn extensions(&self) -> &Mapping {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Mapping {
        &mut self.extensions
    }
}
