use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One extracted metadata field value. ExifTool emits strings, numbers and
/// lists; anything else is carried in its text rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl MetaValue {
    /// Canonical text rendering used by substring checks.
    pub fn as_text(&self) -> String {
        match self {
            MetaValue::Text(s) => s.clone(),
            MetaValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            MetaValue::List(items) => items.join(", "),
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Empty text, zero, and empty lists count as absent where the checks
    /// skip falsy values.
    pub fn is_falsy(&self) -> bool {
        match self {
            MetaValue::Text(s) => s.is_empty(),
            MetaValue::Number(n) => *n == 0.0,
            MetaValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&serde_json::Value> for MetaValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => MetaValue::Text(s.clone()),
            serde_json::Value::Number(n) => MetaValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::Bool(b) => MetaValue::Text(b.to_string()),
            serde_json::Value::Null => MetaValue::Text(String::new()),
            serde_json::Value::Array(items) => MetaValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            other => MetaValue::Text(other.to_string()),
        }
    }
}

/// Flat key/value mapping extracted from one image. Keys follow no fixed
/// schema; every check tolerates absent keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: BTreeMap<String, MetaValue>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from ExifTool `-j` output: a JSON array holding one
    /// object per input file.
    pub fn from_exiftool_json(value: &serde_json::Value) -> CoreResult<Self> {
        let first = value
            .as_array()
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.as_object())
            .ok_or_else(|| {
                CoreError::Extraction("exiftool output was not a JSON array of objects".to_string())
            })?;

        let mut record = MetadataRecord::new();
        for (key, raw) in first {
            record.insert(key.clone(), MetaValue::from(raw));
        }
        Ok(record)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    /// Text rendering of a field, if present.
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(MetaValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.fields.iter()
    }
}
