//! Point-in-time key/value storage snapshots.

use camino::Utf8Path;
use serde_json::Value;

use crate::error::SnapshotError;

/// An ordered copy of a key/value store.
///
/// Entries keep the order they were added in; the full scan visits them in
/// that order. Snapshots loaded from JSON are ordered by key.
///
/// # Examples
///
/// ```
/// use em_credential::StorageSnapshot;
///
/// let snapshot = StorageSnapshot::from_json(r#"{"a": "1", "b": {"value": "x"}}"#).unwrap();
/// assert_eq!(snapshot.get("a"), Some("1"));
/// assert_eq!(snapshot.get("b"), Some(r#"{"value":"x"}"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSnapshot {
    entries: Vec<(String, String)>,
}

impl StorageSnapshot {
    /// Creates an empty snapshot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from key/value pairs. Later duplicates replace
    /// earlier values but keep the original position.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut snapshot = Self::new();
        for (key, value) in pairs {
            snapshot.insert(key, value);
        }
        snapshot
    }

    /// Parses a JSON object. String values are stored as-is; any other value
    /// is stored as its JSON text, the way browser storage would hold it.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(raw)?;
        let object = match value {
            Value::Object(object) => object,
            other => return Err(SnapshotError::NotAnObject(json_kind(&other))),
        };

        Ok(Self::from_pairs(object.into_iter().map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })))
    }

    /// Reads and parses a JSON snapshot file.
    pub fn load(path: &Utf8Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates entries in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
