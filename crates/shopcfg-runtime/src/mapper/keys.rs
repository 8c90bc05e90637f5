//! Document keys.

pub const MODULES: &str = "modules";
pub const MODULE_CHAINS: &str = "moduleChains";

pub const ID: &str = "id";
pub const PATH: &str = "path";
pub const MODULE_SETTINGS: &str = "moduleSettings";

/// Module keys owned by the mapper; extensions never replace them.
pub const MODULE_RESERVED: &[&str] = &[ID, PATH, MODULE_SETTINGS];

/// Module blocks kept verbatim in [`ModuleConfiguration::extensions`](crate::model::ModuleConfiguration::extensions).
pub const MODULE_EXTENSIONS: &[&str] = &[
    "version",
    "configured",
    "title",
    "description",
    "lang",
    "thumbnail",
    "author",
    "url",
    "email",
    "classExtensions",
    "templates",
    "controllers",
    "events",
    "smartyPluginDirectories",
    "templateBlocks",
];

pub const VALUE: &str = "value";
pub const TYPE: &str = "type";
pub const GROUP: &str = "group";
pub const POSITION: &str = "position";
pub const CONSTRAINTS: &str = "constraints";
