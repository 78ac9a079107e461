//! Column definition for the dataset schema catalog.

use crate::types::DataType;

/// A column of a dataset kind's schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Field name, as used after the underscore of a qualified key.
    name: &'static str,
    /// Semantic type of the column.
    data_type: DataType,
}

impl Column {
    /// Creates a new column definition.
    pub const fn new(name: &'static str, data_type: DataType) -> Self {
        Self { name, data_type }
    }

    /// Creates a string column.
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, DataType::String)
    }

    /// Creates a numeric column.
    pub const fn number(name: &'static str) -> Self {
        Self::new(name, DataType::Number)
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the semantic type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}
