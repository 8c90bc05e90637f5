//! Project configuration layout.
//!
//! # Directory Structure
//!
//! ```text
//! <project configuration dir>/       # SHOPCFG_CONFIGURATION_DIR, default var/configuration
//! ├── shops/                         # Base layer, written by ShopConfigurationDao::save
//! │   ├── 1.yaml
//! │   └── 2.yaml
//! └── environment/                   # Optional override layer, edited per deployment
//!     └── 1.yaml
//! ```
//!
//! Both layers use the same document shape; the environment layer is
//! expected to carry only `moduleSettings` values.

mod error;

pub use error::ConfigError;

use shopcfg_types::ShopId;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the project configuration directory.
pub const CONFIGURATION_DIR_ENV: &str = "SHOPCFG_CONFIGURATION_DIR";

/// Project configuration directory used when [`CONFIGURATION_DIR_ENV`] is unset.
pub const DEFAULT_CONFIGURATION_DIR: &str = "var/configuration";

/// Directory holding base shop documents.
pub const SHOPS_DIR: &str = "shops";

/// Directory holding environment override documents.
pub const ENVIRONMENT_DIR: &str = "environment";

/// Extension of every configuration document.
pub const CONFIG_FILE_EXTENSION: &str = "yaml";

/// Resolves where configuration documents live on disk.
///
/// # Example
///
/// ```
/// use shopcfg_runtime::config::ProjectContext;
/// use shopcfg_types::ShopId;
/// use std::path::Path;
///
/// let context = ProjectContext::new("/srv/shop/var/configuration");
/// let shop = ShopId::new(1).expect("valid id");
///
/// assert_eq!(
///     context.shop_file(shop),
///     Path::new("/srv/shop/var/configuration/shops/1.yaml")
/// );
/// assert_eq!(
///     context.environment_file(shop),
///     Path::new("/srv/shop/var/configuration/environment/1.yaml")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    configuration_dir: PathBuf,
}

impl ProjectContext {
    /// Creates a context rooted at `configuration_dir`.
    #[must_use]
    pub fn new(configuration_dir: impl Into<PathBuf>) -> Self {
        Self {
            configuration_dir: configuration_dir.into(),
        }
    }

    /// Creates a context from [`CONFIGURATION_DIR_ENV`], falling back to
    /// [`DEFAULT_CONFIGURATION_DIR`] relative to the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = std::env::var_os(CONFIGURATION_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIGURATION_DIR));
        debug!(dir = %dir.display(), "Resolved project configuration directory");
        Self::new(dir)
    }

    #[must_use]
    pub fn configuration_dir(&self) -> &Path {
        &self.configuration_dir
    }

    #[must_use]
    pub fn shops_dir(&self) -> PathBuf {
        self.configuration_dir.join(SHOPS_DIR)
    }

    #[must_use]
    pub fn environment_dir(&self) -> PathBuf {
        self.configuration_dir.join(ENVIRONMENT_DIR)
    }

    /// Base document of `shop_id`.
    #[must_use]
    pub fn shop_file(&self, shop_id: ShopId) -> PathBuf {
        self.shops_dir().join(document_name(shop_id))
    }

    /// Environment document of `shop_id`.
    #[must_use]
    pub fn environment_file(&self, shop_id: ShopId) -> PathBuf {
        self.environment_dir().join(document_name(shop_id))
    }
}

fn document_name(shop_id: ShopId) -> String {
    format!("{shop_id}.{CONFIG_FILE_EXTENSION}")
}

/// Extracts the shop id from a document path such as `shops/3.yaml`.
///
/// Returns `None` for any other file name, including non-canonical
/// spellings such as `01.yaml` that [`ProjectContext::shop_file`] would
/// never produce.
#[must_use]
pub fn shop_id_from_path(path: &Path) -> Option<ShopId> {
    if path.extension().and_then(|e| e.to_str()) != Some(CONFIG_FILE_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let shop_id: ShopId = stem.parse().ok()?;
    (shop_id.to_string() == stem).then_some(shop_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_configuration_dir() {
        let context = ProjectContext::new("/cfg");
        assert_eq!(context.configuration_dir(), Path::new("/cfg"));
        assert_eq!(context.shops_dir(), Path::new("/cfg/shops"));
        assert_eq!(context.environment_dir(), Path::new("/cfg/environment"));
    }

    #[test]
    fn shop_id_from_document_paths() {
        assert_eq!(
            shop_id_from_path(Path::new("/cfg/shops/3.yaml")),
            ShopId::new(3)
        );
        assert_eq!(shop_id_from_path(Path::new("/cfg/shops/3.yml")), None);
        assert_eq!(shop_id_from_path(Path::new("/cfg/shops/0.yaml")), None);
        assert_eq!(shop_id_from_path(Path::new("/cfg/shops/backup.yaml")), None);
    }

    #[test]
    fn shop_id_from_path_requires_canonical_stem() {
        for name in ["01.yaml", "+1.yaml", "007.yaml", " 1.yaml"] {
            let path = Path::new("/cfg/shops").join(name);
            assert_eq!(shop_id_from_path(&path), None, "{name} must not map to a shop");
        }

        let context = ProjectContext::new("/cfg");
        let shop = ShopId::new(12).expect("12 is a valid shop id");
        assert_eq!(shop_id_from_path(&context.shop_file(shop)), Some(shop));
    }

    #[test]
    fn from_env_reads_override() {
        // Modifies process env; the variable is unique to this test.
        std::env::set_var(CONFIGURATION_DIR_ENV, "/tmp/shopcfg-from-env");
        let context = ProjectContext::from_env();
        std::env::remove_var(CONFIGURATION_DIR_ENV);

        assert_eq!(context.configuration_dir(), Path::new("/tmp/shopcfg-from-env"));

        let fallback = ProjectContext::from_env();
        assert_eq!(fallback.configuration_dir(), Path::new(DEFAULT_CONFIGURATION_DIR));
    }
}
