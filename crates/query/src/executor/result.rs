//! Output rows.

use alloc::string::String;
use alloc::vec::Vec;
use insight_core::Value;
use insight_json::{JsonObject, JsonValue};

/// One row of a query result: output keys mapped to values, in COLUMNS order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultRow {
    entries: Vec<(String, Value)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value. A key that is already present keeps its first value,
    /// so a column repeated in COLUMNS is emitted once.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.entries.push((key, value));
        }
    }

    /// Gets a value by output key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts this row into a value-tree object.
    pub fn into_json(self) -> JsonObject {
        let mut obj = JsonObject::with_capacity(self.entries.len());
        for (key, value) in self.entries {
            obj.insert(key, value_to_json(value));
        }
        obj
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (key, value) in iter {
            row.push(key, value);
        }
        row
    }
}

impl From<ResultRow> for JsonValue {
    fn from(row: ResultRow) -> Self {
        JsonValue::Object(row.into_json())
    }
}

/// Converts a cell value into a value-tree value.
pub fn value_to_json(value: Value) -> JsonValue {
    match value {
        Value::Number(n) => JsonValue::Number(n),
        Value::String(s) => JsonValue::String(s),
    }
}
