//! Tagged default values.
//!
//! Default and initial values arrive from every platform as loosely typed
//! JSON. They are held as a tagged value so that equality is structural:
//! objects are key-ordered maps, so two objects with the same entries compare
//! equal no matter how their keys were ordered on input.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A default or initial value attached to a property, parameter or state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<DefaultValue>),
    Object(BTreeMap<String, DefaultValue>),
}

impl DefaultValue {
    /// Short name of the value's tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Whether this is the explicit `null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            // f64 Display already drops the fractional part of integral values
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<DefaultValue>> From<Vec<T>> for DefaultValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Render an optional value, using `none` for absence.
pub fn render_optional(value: Option<&DefaultValue>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Deserialize a present key as `Some`, including an explicit `null`.
///
/// Used with `#[serde(default)]` so a missing key stays `None` while
/// `"defaultValue": null` becomes `Some(DefaultValue::Null)`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<DefaultValue>, D::Error>
where
    D: Deserializer<'de>,
{
    DefaultValue::deserialize(deserializer).map(Some)
}
