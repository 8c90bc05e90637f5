//! End-to-end behaviour of ShopConfigurationDao against YAML files on disk.

use serde_yaml::{Mapping, Value};
use shopcfg_runtime::config::ProjectContext;
use shopcfg_runtime::dao::ShopConfigurationDao;
use shopcfg_runtime::mapper::ModuleSettingsMapper;
use shopcfg_runtime::model::{ModuleConfiguration, Setting, SettingType, ShopConfiguration};
use shopcfg_runtime::storage::{DocumentStorage, YamlFileStorage};
use shopcfg_runtime::ConfigError;
use shopcfg_types::{ErrorCode, ShopId};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const TEST_MODULE_ID: &str = "testModuleId";
const TESTED_SETTING: &str = "settingToOverwrite";
const ORIGINAL_VALUE: &str = "some-original-value";
const NEW_VALUE: &str = "some-new-value";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("shopcfg_runtime=debug")
        .with_test_writer()
        .try_init();
}

fn shop(id: u32) -> ShopId {
    ShopId::new(id).expect("test shop ids are positive")
}

struct Project {
    temp: TempDir,
}

impl Project {
    fn new() -> Self {
        init_tracing();
        Self {
            temp: TempDir::new().expect("should create temp project configuration dir"),
        }
    }

    fn context(&self) -> ProjectContext {
        ProjectContext::new(self.temp.path())
    }

    /// A fresh store, as a new request would get.
    fn dao(&self) -> ShopConfigurationDao {
        ShopConfigurationDao::new(self.context())
    }

    fn write_document(&self, relative: &str, document: &Value) {
        YamlFileStorage::new()
            .save(&self.temp.path().join(relative), document)
            .expect("should write fixture document");
    }

    fn write_raw(&self, relative: &str, content: &str) {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("should create fixture dir");
        }
        std::fs::write(path, content).expect("should write fixture file");
    }

    fn configure_module_in_shop_file(&self, dao: &ShopConfigurationDao) {
        let module = ModuleConfiguration::new(TEST_MODULE_ID, "test").with_module_setting(
            Setting::new(TESTED_SETTING, ORIGINAL_VALUE).with_type(SettingType::Int),
        );
        dao.save(ShopConfiguration::new().with_module_configuration(module), shop(1))
            .expect("should save shop configuration with module");
    }

    fn configure_environment(&self, module_ids: &[&str]) {
        let mut modules = Mapping::new();
        for module_id in module_ids {
            modules.insert(Value::from(*module_id), override_entry(NEW_VALUE));
        }
        let mut root = Mapping::new();
        root.insert(Value::from("modules"), Value::Mapping(modules));
        self.write_document("environment/1.yaml", &Value::Mapping(root));
    }
}

fn override_entry(value: &str) -> Value {
    let mut setting = Mapping::new();
    setting.insert(Value::from("value"), Value::from(value));
    let mut settings = Mapping::new();
    settings.insert(Value::from(TESTED_SETTING), Value::Mapping(setting));
    let mut entry = Mapping::new();
    entry.insert(
        Value::from(ModuleSettingsMapper::MAPPING_KEY),
        Value::Mapping(settings),
    );
    Value::Mapping(entry)
}

fn tested_value(config: &ShopConfiguration) -> Option<&str> {
    config
        .module_configuration(TEST_MODULE_ID)?
        .module_setting(TESTED_SETTING)?
        .value()
        .as_str()
}

#[test]
fn save_and_get() {
    let project = Project::new();
    let dao = project.dao();

    let with_module = ShopConfiguration::new()
        .with_module_configuration(ModuleConfiguration::new("test", "test"));
    dao.save(with_module.clone(), shop(1))
        .expect("should save configuration with module");
    dao.save(ShopConfiguration::new(), shop(2))
        .expect("should save empty configuration");

    assert_eq!(*dao.get(shop(1)).expect("should get shop 1"), with_module);
    assert_eq!(*dao.get(shop(2)).expect("should get shop 2"), ShopConfiguration::new());

    let reloaded = project.dao();
    assert_eq!(*reloaded.get(shop(1)).expect("should reload shop 1"), with_module);
    assert_eq!(
        *reloaded.get(shop(2)).expect("should reload shop 2"),
        ShopConfiguration::new()
    );
}

#[test]
fn environment_configuration_overwrites_shop_configuration() {
    let project = Project::new();
    project.configure_module_in_shop_file(&project.dao());
    project.configure_environment(&[TEST_MODULE_ID]);

    let config = project.dao().get(shop(1)).expect("should resolve configuration");
    assert_eq!(tested_value(&config), Some(NEW_VALUE));

    let setting = config
        .module_configuration(TEST_MODULE_ID)
        .and_then(|m| m.module_setting(TESTED_SETTING))
        .expect("overridden setting exists");
    assert_eq!(setting.setting_type(), SettingType::Int);
}

#[test]
fn saved_instance_is_served_until_invalidated() {
    let project = Project::new();
    let dao = project.dao();
    project.configure_module_in_shop_file(&dao);
    project.configure_environment(&[TEST_MODULE_ID]);

    let cached = dao.get(shop(1)).expect("should serve saved configuration");
    assert_eq!(tested_value(&cached), Some(ORIGINAL_VALUE));

    dao.invalidate(shop(1));
    let resolved = dao.get(shop(1)).expect("should reload with environment");
    assert_eq!(tested_value(&resolved), Some(NEW_VALUE));
}

#[test]
fn empty_shop_configuration_ignores_module_in_environment() {
    let project = Project::new();
    project
        .dao()
        .save(ShopConfiguration::new(), shop(1))
        .expect("should save empty configuration");
    project.configure_environment(&[TEST_MODULE_ID]);

    let config = project.dao().get(shop(1)).expect("should resolve configuration");
    assert!(config.module_configurations().is_empty());
}

#[test]
fn module_missing_from_shop_but_configured_in_environment_is_ignored() {
    let project = Project::new();
    project.configure_module_in_shop_file(&project.dao());
    project.write_document("environment/1.yaml", &{
        let mut modules = Mapping::new();
        modules.insert(Value::from(TEST_MODULE_ID), override_entry(ORIGINAL_VALUE));
        modules.insert(Value::from("module-not-installed"), override_entry(NEW_VALUE));
        let mut root = Mapping::new();
        root.insert(Value::from("modules"), Value::Mapping(modules));
        Value::Mapping(root)
    });

    let config = project.dao().get(shop(1)).expect("should resolve configuration");
    assert_eq!(tested_value(&config), Some(ORIGINAL_VALUE));
    assert!(!config.has_module_configuration("module-not-installed"));
    assert_eq!(config.module_configurations().len(), 1);
}

#[test]
fn get_returns_same_instance_until_changed() {
    let project = Project::new();
    let dao = project.dao();
    dao.save(ShopConfiguration::new(), shop(1))
        .expect("should save configuration");

    let first = dao.get(shop(1)).expect("should get configuration");
    let second = dao.get(shop(1)).expect("should get configuration again");
    assert!(Arc::ptr_eq(&first, &second));

    let fresh = project.dao();
    let loaded = fresh.get(shop(1)).expect("should load from disk");
    assert!(Arc::ptr_eq(
        &loaded,
        &fresh.get(shop(1)).expect("should hit cache")
    ));
}

#[test]
fn get_all_returns_exactly_saved_shops() {
    let project = Project::new();
    let dao = project.dao();
    dao.save(ShopConfiguration::new(), shop(1))
        .expect("should save shop 1");
    assert_eq!(*dao.get(shop(1)).expect("should get shop 1"), ShopConfiguration::new());
    dao.save(ShopConfiguration::new(), shop(3))
        .expect("should save shop 3");

    let all = dao.get_all().expect("should get all shops");
    let ids: Vec<ShopId> = all.keys().copied().collect();
    assert_eq!(ids, vec![shop(1), shop(3)]);
    assert!(all.values().all(|c| **c == ShopConfiguration::new()));

    let cached = dao.get(shop(3)).expect("should get shop 3");
    assert!(Arc::ptr_eq(&cached, &all[&shop(3)]));
}

#[test]
fn get_all_applies_environment_overrides() {
    let project = Project::new();
    project.configure_module_in_shop_file(&project.dao());
    project.configure_environment(&[TEST_MODULE_ID]);

    let all = project.dao().get_all().expect("should get all shops");
    assert_eq!(all.len(), 1);
    assert_eq!(tested_value(&all[&shop(1)]), Some(NEW_VALUE));
}

#[test]
fn incorrect_node_in_shop_file_is_invalid_configuration() {
    let project = Project::new();
    project
        .dao()
        .save(ShopConfiguration::new(), shop(1))
        .expect("should save configuration");
    project.write_document(
        "shops/1.yaml",
        &Value::Sequence(vec![Value::from("incorrectKey")]),
    );

    let err = project
        .dao()
        .get(shop(1))
        .expect_err("sequence document must be rejected");
    assert!(err.is_invalid_configuration(), "unexpected error: {err}");
    assert!(!err.is_not_found());
    assert_eq!(err.code(), "CONFIG_INVALID");
}

#[test]
fn get_unknown_shop_id_is_not_found() {
    let project = Project::new();
    let dao = project.dao();
    for id in 1..=3 {
        dao.save(ShopConfiguration::new(), shop(id))
            .expect("should save configuration");
    }

    let err = dao.get(shop(99)).expect_err("shop 99 was never saved");
    assert!(matches!(
        err,
        ConfigError::ShopConfigurationNotFound { shop_id } if shop_id == shop(99)
    ));
}

#[test]
fn bad_shop_configuration_file_is_invalid_configuration() {
    let project = Project::new();
    project.write_raw("shops/1.yaml", "test: test\n");

    let err = project
        .dao()
        .get(shop(1))
        .expect_err("unknown top-level key must be rejected");
    assert!(err.is_invalid_configuration(), "unexpected error: {err}");
    assert_eq!(err.schema_error().map(|e| e.path()), Some("test"));
    assert_eq!(
        err.path(),
        Some(project.temp.path().join("shops").join("1.yaml").as_path())
    );
}

#[test]
fn bad_environment_configuration_file_is_invalid_configuration() {
    let project = Project::new();
    project
        .dao()
        .save(ShopConfiguration::new(), shop(1))
        .expect("should save configuration");
    project.write_raw("environment/1.yaml", "test: test\n");

    let err = project
        .dao()
        .get(shop(1))
        .expect_err("unknown top-level key in environment must be rejected");
    assert!(err.is_invalid_configuration(), "unexpected error: {err}");
    assert!(err
        .path()
        .is_some_and(|p| p.ends_with(Path::new("environment").join("1.yaml"))));
}

#[test]
fn sequence_environment_file_is_invalid_configuration() {
    let project = Project::new();
    project
        .dao()
        .save(ShopConfiguration::new(), shop(1))
        .expect("should save configuration");
    project.write_raw("environment/1.yaml", "- incorrectKey\n");

    let err = project
        .dao()
        .get(shop(1))
        .expect_err("sequence environment document must be rejected");
    assert!(err.is_invalid_configuration(), "unexpected error: {err}");
}

#[test]
fn broken_yaml_is_a_storage_error() {
    let project = Project::new();
    project.write_raw("shops/1.yaml", "modules: [unclosed\n");

    let err = project
        .dao()
        .get(shop(1))
        .expect_err("broken yaml must not load");
    assert!(matches!(err, ConfigError::Storage(_)), "unexpected error: {err}");
    assert!(!err.is_not_found());
}

#[test]
fn delete_all_removes_every_shop() {
    let project = Project::new();
    let dao = project.dao();
    for id in 1..=3 {
        dao.save(ShopConfiguration::new(), shop(id))
            .expect("should save configuration");
    }

    dao.delete_all().expect("should delete all configurations");

    let err = dao.get(shop(1)).expect_err("deleted shop must not be cached");
    assert!(err.is_not_found());
    assert!(dao.get_all().expect("should list after delete").is_empty());
    assert!(!project.temp.path().join("shops").join("2.yaml").exists());
}

#[test]
fn delete_all_keeps_environment_documents() {
    let project = Project::new();
    project.configure_module_in_shop_file(&project.dao());
    project.configure_environment(&[TEST_MODULE_ID]);

    project.dao().delete_all().expect("should delete all configurations");

    assert!(project.context().environment_file(shop(1)).exists());
}

#[test]
fn concurrent_readers_share_one_instance() {
    let project = Project::new();
    project.configure_module_in_shop_file(&project.dao());
    project.configure_environment(&[TEST_MODULE_ID]);

    let dao = Arc::new(project.dao());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let dao = Arc::clone(&dao);
            std::thread::spawn(move || dao.get(shop(1)))
        })
        .collect();

    let results: Vec<Arc<ShopConfiguration>> = handles
        .into_iter()
        .map(|h| {
            h.join()
                .expect("reader thread should not panic")
                .expect("reader should resolve configuration")
        })
        .collect();

    let first = &results[0];
    assert_eq!(tested_value(first), Some(NEW_VALUE));
    assert!(results.iter().all(|r| Arc::ptr_eq(r, first)));
}
