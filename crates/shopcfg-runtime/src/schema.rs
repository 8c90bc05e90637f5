//! Structural validation of configuration documents.
//!
//! Both layers share one schema:
//!
//! ```yaml
//! modules:
//!   <moduleId>:
//!     id: <moduleId>          # optional, must match the key
//!     path: <string>          # optional
//!     moduleSettings:
//!       <settingName>:
//!         value: <any>        # required
//!         type: <settingType> # optional
//!         group: <string>     # optional
//!         position: <int>     # optional
//!         constraints: [..]   # optional
//!     <extension block>: <any>
//! moduleChains: <mapping>     # optional, opaque
//! ```
//!
//! Anything else fails with a [`SchemaError`] naming the offending path.
//! Nothing is coerced or repaired.

use crate::mapper::keys;
use crate::model::SettingType;
use crate::storage::Document;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Path used for the document root in [`SchemaError::path`].
pub const ROOT_PATH: &str = "<root>";

/// A document that violates the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration at '{path}': {reason}")]
pub struct SchemaError {
    path: String,
    reason: String,
}

impl SchemaError {
    /// Creates a schema error at a dot-separated document path.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Dot-separated location of the violation, [`ROOT_PATH`] for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A document that passed [`validate`].
///
/// Only `validate` constructs it, so the mapper can rely on the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDocument {
    root: Mapping,
}

impl ValidatedDocument {
    /// Validated root mapping.
    #[must_use]
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Returns the root mapping.
    #[must_use]
    pub fn into_root(self) -> Mapping {
        self.root
    }
}

/// Checks `document` against the configuration schema.
///
/// # Errors
///
/// Returns [`SchemaError`] for the first violation found.
///
/// # Example
///
/// ```
/// use shopcfg_runtime::schema::{validate, ROOT_PATH};
///
/// let document = serde_yaml::from_str("- incorrectKey").expect("valid yaml");
/// let err = validate(document).expect_err("a sequence is not a configuration");
/// assert_eq!(err.path(), ROOT_PATH);
/// ```
pub fn validate(document: Document) -> Result<ValidatedDocument, SchemaError> {
    let root = match document {
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(SchemaError::new(
                ROOT_PATH,
                format!("expected a mapping, found {}", kind(&other)),
            ))
        }
    };

    for (key, value) in &root {
        let key = string_key(key, ROOT_PATH)?;
        let path = child(ROOT_PATH, key);
        match key {
            keys::MODULES => validate_modules(value, &path)?,
            keys::MODULE_CHAINS => {
                optional_mapping(value, &path)?;
            }
            _ => return Err(unrecognized(path, &[keys::MODULES, keys::MODULE_CHAINS])),
        }
    }

    Ok(ValidatedDocument { root })
}

fn validate_modules(value: &Value, path: &str) -> Result<(), SchemaError> {
    let Some(modules) = optional_mapping(value, path)? else {
        return Ok(());
    };

    for (module_id, entry) in modules {
        let module_id = string_key(module_id, path)?;
        let module_path = child(path, module_id);
        if module_id.is_empty() {
            return Err(SchemaError::new(module_path, "module id must not be empty"));
        }
        validate_module(module_id, entry, &module_path)?;
    }
    Ok(())
}

fn validate_module(module_id: &str, entry: &Value, path: &str) -> Result<(), SchemaError> {
    let Some(entry) = optional_mapping(entry, path)? else {
        return Ok(());
    };

    for (key, value) in entry {
        let key = string_key(key, path)?;
        let key_path = child(path, key);
        match key {
            keys::ID => {
                let id = string_value(value, &key_path)?;
                if id != module_id {
                    return Err(SchemaError::new(
                        key_path,
                        format!("module id '{id}' does not match its key '{module_id}'"),
                    ));
                }
            }
            keys::PATH => {
                string_value(value, &key_path)?;
            }
            keys::MODULE_SETTINGS => validate_settings(value, &key_path)?,
            k if keys::MODULE_EXTENSIONS.contains(&k) => {}
            _ => {
                let mut expected = vec![keys::ID, keys::PATH, keys::MODULE_SETTINGS];
                expected.extend_from_slice(keys::MODULE_EXTENSIONS);
                return Err(unrecognized(key_path, &expected));
            }
        }
    }
    Ok(())
}

fn validate_settings(value: &Value, path: &str) -> Result<(), SchemaError> {
    let Some(settings) = optional_mapping(value, path)? else {
        return Ok(());
    };

    for (name, entry) in settings {
        let name = string_key(name, path)?;
        let setting_path = child(path, name);
        if name.is_empty() {
            return Err(SchemaError::new(setting_path, "setting name must not be empty"));
        }

        let entry = match entry {
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(SchemaError::new(
                    setting_path,
                    format!("expected a mapping, found {}", kind(other)),
                ))
            }
        };

        if entry.get(keys::VALUE).is_none() {
            return Err(SchemaError::new(
                setting_path,
                format!("missing required key '{}'", keys::VALUE),
            ));
        }

        for (key, attribute) in entry {
            let key = string_key(key, &setting_path)?;
            let attribute_path = child(&setting_path, key);
            match key {
                keys::VALUE => {}
                keys::TYPE => {
                    let name = string_value(attribute, &attribute_path)?;
                    name.parse::<SettingType>()
                        .map_err(|e| SchemaError::new(&attribute_path, e.to_string()))?;
                }
                keys::GROUP => {
                    string_value(attribute, &attribute_path)?;
                }
                keys::POSITION => {
                    if attribute.as_i64().is_none() {
                        return Err(SchemaError::new(
                            attribute_path,
                            format!("expected an integer, found {}", kind(attribute)),
                        ));
                    }
                }
                keys::CONSTRAINTS => validate_constraints(attribute, &attribute_path)?,
                _ => {
                    return Err(unrecognized(
                        attribute_path,
                        &[
                            keys::VALUE,
                            keys::TYPE,
                            keys::GROUP,
                            keys::POSITION,
                            keys::CONSTRAINTS,
                        ],
                    ))
                }
            }
        }
    }
    Ok(())
}

fn validate_constraints(value: &Value, path: &str) -> Result<(), SchemaError> {
    let Value::Sequence(items) = value else {
        return Err(SchemaError::new(
            path,
            format!("expected a sequence, found {}", kind(value)),
        ));
    };
    for (index, item) in items.iter().enumerate() {
        string_value(item, &child(path, &index.to_string()))?;
    }
    Ok(())
}

/// `null` counts as an empty mapping so that `modules:` with no entries is valid.
fn optional_mapping<'a>(value: &'a Value, path: &str) -> Result<Option<&'a Mapping>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        Value::Mapping(mapping) => Ok(Some(mapping)),
        other => Err(SchemaError::new(
            path,
            format!("expected a mapping, found {}", kind(other)),
        )),
    }
}

fn string_key<'a>(key: &'a Value, parent: &str) -> Result<&'a str, SchemaError> {
    key.as_str().ok_or_else(|| {
        SchemaError::new(parent, format!("expected string keys, found {} key", kind(key)))
    })
}

fn string_value<'a>(value: &'a Value, path: &str) -> Result<&'a str, SchemaError> {
    value.as_str().ok_or_else(|| {
        SchemaError::new(path, format!("expected a string, found {}", kind(value)))
    })
}

fn unrecognized(path: String, expected: &[&str]) -> SchemaError {
    SchemaError::new(
        path,
        format!("unrecognized option, expected one of: {}", expected.join(", ")),
    )
}

fn child(parent: &str, key: &str) -> String {
    if parent == ROOT_PATH {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
