//! Field value types accepted by create and update calls

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// One element of a list-valued field (link rows, multiple select)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for ListItem {
    fn from(v: i64) -> Self {
        ListItem::Int(v)
    }
}

impl From<i32> for ListItem {
    fn from(v: i32) -> Self {
        ListItem::Int(v as i64)
    }
}

impl From<u32> for ListItem {
    fn from(v: u32) -> Self {
        ListItem::Int(v as i64)
    }
}

impl From<f64> for ListItem {
    fn from(v: f64) -> Self {
        ListItem::Float(v)
    }
}

impl From<&str> for ListItem {
    fn from(v: &str) -> Self {
        ListItem::Text(v.to_string())
    }
}

impl From<String> for ListItem {
    fn from(v: String) -> Self {
        ListItem::Text(v)
    }
}

/// A value that can be written into a row field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ListItem>),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl<T: Into<ListItem>> From<Vec<T>> for FieldValue {
    fn from(v: Vec<T>) -> Self {
        FieldValue::List(v.into_iter().map(Into::into).collect())
    }
}

/// Field map sent as the body of create and update requests
///
/// A key mapped to `None` is absent: it is left out of the serialized body,
/// so an update does not touch that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: BTreeMap<String, Option<FieldValue>>,
}

impl Fields {
    /// Create an empty field map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style insert of an absent value
    pub fn without(mut self, key: impl Into<String>) -> Self {
        self.entries.insert(key.into(), None);
        self
    }

    /// Set a field value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Insert a possibly absent value
    pub fn insert(&mut self, key: impl Into<String>, value: Option<FieldValue>) {
        self.entries.insert(key.into(), value);
    }

    /// Value for `key`; `None` when unknown or absent
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Number of keys that will be serialized
    pub fn len(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the present key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.set(k, v);
        }
        fields
    }
}
