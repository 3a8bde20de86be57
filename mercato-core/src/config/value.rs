use super::ConfigError;

/// A scalar or list value stored under a flattened config key.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ConfigValue>),
    Null,
}

impl ConfigValue {
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s.clone()),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::List(seq.iter().map(ConfigValue::from_yaml).collect())
            }
            serde_yaml::Value::Tagged(tagged) => ConfigValue::from_yaml(&tagged.value),
            serde_yaml::Value::Null | serde_yaml::Value::Mapping(_) => ConfigValue::Null,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Integer(i) => Some(i.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::List(_) | ConfigValue::Null => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

/// Conversion from a raw [`ConfigValue`] into a concrete type.
///
/// Environment variables always arrive as strings, so every numeric and
/// boolean impl also accepts a parseable string.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        value.as_text().ok_or_else(|| ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: "string",
        })
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(ConfigError::TypeMismatch {
                    key: key.to_string(),
                    expected: "bool",
                }),
            },
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "bool",
            }),
        }
    }
}

macro_rules! integer_from_config {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                    let mismatch = || ConfigError::TypeMismatch {
                        key: key.to_string(),
                        expected: stringify!($ty),
                    };
                    match value {
                        ConfigValue::Integer(i) => <$ty>::try_from(*i).map_err(|_| mismatch()),
                        ConfigValue::String(s) => s.trim().parse::<$ty>().map_err(|_| mismatch()),
                        _ => Err(mismatch()),
                    }
                }
            }
        )*
    };
}

integer_from_config!(i64, u64, u32, u16, usize);

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let mismatch = || ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: "f64",
        };
        match value {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(i) => Ok(*i as f64),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| mismatch()),
            _ => Err(mismatch()),
        }
    }
}

/// Lists come from YAML sequences, or from a comma-separated string when set
/// through the environment.
impl FromConfigValue for Vec<String> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::List(items) => items
                .iter()
                .map(|item| String::from_config_value(item, key))
                .collect(),
            ConfigValue::String(s) => Ok(s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect()),
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "list",
            }),
        }
    }
}
