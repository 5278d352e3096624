use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Document metadata: keys in the order they were written.
pub type Metadata = IndexMap<String, MetaValue>;

/// A single metadata value.
///
/// Scalars (strings, numbers, booleans) are kept as their textual form, so
/// `version: 1.0` and `version: "1.0"` read back the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Text(String),
    List(Vec<MetaValue>),
    Map(Metadata),
}

impl MetaValue {
    /// Returns the text of a scalar value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items of a list value.
    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts a parsed YAML value, flattening scalars to text.
    pub fn from_yaml(value: Value) -> Self {
        match value {
            Value::Null => MetaValue::Null,
            Value::Bool(b) => MetaValue::Text(b.to_string()),
            Value::Number(n) => MetaValue::Text(n.to_string()),
            Value::String(s) => MetaValue::Text(s),
            Value::Sequence(items) => {
                MetaValue::List(items.into_iter().map(MetaValue::from_yaml).collect())
            }
            Value::Mapping(m) => MetaValue::Map(metadata_from_mapping(m)),
            Value::Tagged(tagged) => MetaValue::from_yaml(tagged.value),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Text(s)
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(items: Vec<T>) -> Self {
        MetaValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Converts a YAML mapping into [`Metadata`], keeping key order.
pub fn metadata_from_mapping(mapping: Mapping) -> Metadata {
    mapping
        .into_iter()
        .map(|(k, v)| (key_text(k), MetaValue::from_yaml(v)))
        .collect()
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
