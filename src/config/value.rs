//! Untyped configuration values
//!
//! A raw configuration is whatever the user wrote: a JSON/YAML/TOML document
//! or a mapping built in code. Code-built mappings may also carry closures
//! for function-valued linter commands and custom renderers, which is why
//! this is not simply `serde_json::Value`.

use indexmap::IndexMap;
use serde_json::{Number, Value};

use super::linter::LinterFn;
use super::options::RenderFn;

/// Raw configuration mapping, in the order the user wrote it.
pub type RawConfig = IndexMap<String, RawValue>;

/// A single untyped configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<RawValue>),
    Object(RawConfig),
    /// Function-valued linter command, resolved against matched filenames
    Linter(LinterFn),
    /// Custom renderer
    Renderer(RenderFn),
}

impl RawValue {
    /// Human-readable name of the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::String(_) => "string",
            RawValue::Array(_) => "array",
            RawValue::Object(_) => "object",
            RawValue::Linter(_) | RawValue::Renderer(_) => "function",
        }
    }

    /// Type name plus the value itself for scalars, e.g. `number (1)`.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Null => "null".to_string(),
            RawValue::Bool(_) | RawValue::Number(_) | RawValue::String(_) => {
                format!("{} ({})", self.type_name(), self.to_json())
            }
            RawValue::Array(_) => format!("array ({})", self.to_json()),
            _ => self.type_name().to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&RawConfig> {
        match self {
            RawValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Unwrap an object into its mapping.
    pub fn into_object(self) -> Result<RawConfig, RawValue> {
        match self {
            RawValue::Object(map) => Ok(map),
            other => Err(other),
        }
    }

    /// Render as JSON. Functions have no JSON form and render as `"[Function]"`.
    pub fn to_json(&self) -> Value {
        match self {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(*b),
            RawValue::Number(n) => Value::Number(n.clone()),
            RawValue::String(s) => Value::String(s.clone()),
            RawValue::Array(items) => Value::Array(items.iter().map(RawValue::to_json).collect()),
            RawValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            RawValue::Linter(_) | RawValue::Renderer(_) => {
                Value::String("[Function]".to_string())
            }
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => RawValue::Number(n),
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => {
                RawValue::Object(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<u64> for RawValue {
    fn from(n: u64) -> Self {
        RawValue::Number(n.into())
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<RawConfig> for RawValue {
    fn from(map: RawConfig) -> Self {
        RawValue::Object(map)
    }
}

impl From<LinterFn> for RawValue {
    fn from(f: LinterFn) -> Self {
        RawValue::Linter(f)
    }
}

impl From<RenderFn> for RawValue {
    fn from(f: RenderFn) -> Self {
        RawValue::Renderer(f)
    }
}

/// Build a raw configuration from a JSON object.
///
/// Returns `None` when the value is not an object.
pub fn raw_config_from_json(value: Value) -> Option<RawConfig> {
    RawValue::from(value).into_object().ok()
}
