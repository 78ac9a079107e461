//! Row structure for dataset records.
//!
//! A row stores its values positionally, in the column order its dataset kind
//! declares. Rows are not validated on construction: a row handed over by an
//! ingestion collaborator may be short or carry a mistyped cell, and the query
//! engine treats such rows as non-matching instead of failing.

use crate::schema::DatasetKind;
use crate::value::Value;
use alloc::vec::Vec;

/// A record of one dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Values stored in this row, indexed by column position.
    values: Vec<Value>,
}

impl Row {
    /// Creates a new row from values in column order.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Gets a value at the given column index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if every column of `kind` is present with its declared type.
    pub fn conforms_to(&self, kind: DatasetKind) -> bool {
        let columns = kind.columns();
        self.values.len() == columns.len()
            && columns
                .iter()
                .zip(self.values.iter())
                .all(|(column, value)| value.is_type(column.data_type()))
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
