//! Resolved field references.

use alloc::format;
use alloc::string::String;
use core::fmt;
use insight_core::schema::DatasetKind;
use insight_core::DataType;

/// A qualified key (`datasetId_field`) resolved against a dataset kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Dataset id the key names.
    pub dataset_id: String,
    /// Field name within the dataset kind.
    pub field: &'static str,
    /// Column position of the field in a row of that kind.
    pub index: usize,
    /// Declared type of the field.
    pub data_type: DataType,
}

impl Attribute {
    /// Creates an attribute for a field of the given kind, if the field exists.
    pub fn new(dataset_id: impl Into<String>, kind: DatasetKind, field: &str) -> Option<Self> {
        let index = kind.column_index(field)?;
        let column = &kind.columns()[index];
        Some(Self {
            dataset_id: dataset_id.into(),
            field: column.name(),
            index,
            data_type: column.data_type(),
        })
    }

    /// Returns the qualified key, as used for output rows.
    pub fn key(&self) -> String {
        format!("{}_{}", self.dataset_id, self.field)
    }

    /// Returns true if the field is numeric.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.data_type.is_numeric()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.dataset_id, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_new() {
        let attr = Attribute::new("rooms", DatasetKind::Rooms, "seats").unwrap();
        assert_eq!(attr.index, 7);
        assert_eq!(attr.data_type, DataType::Number);
        assert_eq!(attr.key(), "rooms_seats");
        assert!(attr.is_numeric());
    }

    #[test]
    fn test_attribute_unknown_field() {
        assert!(Attribute::new("rooms", DatasetKind::Rooms, "avg").is_none());
    }
}
