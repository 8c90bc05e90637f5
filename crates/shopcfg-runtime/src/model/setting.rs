//! Module settings.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

/// Representation hint for a setting value.
///
/// Canonical names are `string`, `int`, `bool` and `array`. Older shop
/// installations wrote `str`, `num`, `arr`, `aarr`, `select` and
/// `password`; these are accepted on read and map onto the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    #[default]
    String,
    Int,
    Bool,
    Array,
}

impl SettingType {
    /// Canonical name written to documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Array => "array",
        }
    }

    /// Infers the type from a value when the document carries no `type`.
    #[must_use]
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Int,
            Value::Sequence(_) | Value::Mapping(_) => Self::Array,
            Value::Tagged(tagged) => Self::infer(&tagged.value),
            _ => Self::String,
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingType {
    type Err = UnknownSettingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "str" | "select" | "password" => Ok(Self::String),
            "int" | "num" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            "array" | "arr" | "aarr" => Ok(Self::Array),
            other => Err(UnknownSettingType(other.to_string())),
        }
    }
}

/// A `type` name outside [`SettingType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting type '{0}'")]
pub struct UnknownSettingType(pub String);

/// One named configuration value of a module.
///
/// The name is the merge key between the base and environment layers and
/// cannot change after construction.
///
/// # Example
///
/// ```
/// use shopcfg_runtime::model::{Setting, SettingType};
///
/// let setting = Setting::new("perPage", 20).with_group("display");
/// assert_eq!(setting.name(), "perPage");
/// assert_eq!(setting.setting_type(), SettingType::Int);
/// assert_eq!(setting.group(), Some("display"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    name: String,
    value: Value,
    setting_type: SettingType,
    group: Option<String>,
    position: Option<i64>,
    constraints: Vec<String>,
}

impl Setting {
    /// Creates a setting, inferring its type from `value`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let setting_type = SettingType::infer(&value);
        Self {
            name: name.into(),
            value,
            setting_type,
            group: None,
            position: None,
            constraints: Vec::new(),
        }
    }

    /// Overrides the inferred type.
    #[must_use]
    pub fn with_type(mut self, setting_type: SettingType) -> Self {
        self.setting_type = setting_type;
        self
    }

    /// Sets the admin group the setting is displayed in.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the display position within the group.
    #[must_use]
    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the allowed values for select-style settings.
    #[must_use]
    pub fn with_constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the value. Type and presentation attributes are kept.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    #[must_use]
    pub fn setting_type(&self) -> SettingType {
        self.setting_type
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> Option<i64> {
        self.position
    }

    #[must_use]
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }
}
