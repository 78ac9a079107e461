//! Dataset definition.

use crate::error::{Error, Result};
use crate::row::Row;
use crate::schema::DatasetKind;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// An identified collection of rows of a single kind.
///
/// Datasets are immutable once built; queries borrow them for the duration of
/// one call.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    id: String,
    kind: DatasetKind,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a new dataset, validating its id.
    pub fn new(id: impl Into<String>, kind: DatasetKind, rows: Vec<Row>) -> Result<Self> {
        let id = id.into();
        Self::check_id(&id)?;
        Ok(Self { id, kind, rows })
    }

    /// Validates a dataset id: non-empty, no underscore, no whitespace.
    ///
    /// The underscore separates the id from the field in qualified keys, so an
    /// id containing one could never be queried.
    pub fn check_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::invalid_dataset("Dataset id cannot be empty"));
        }
        if id.contains('_') {
            return Err(Error::invalid_dataset(format!(
                "Dataset id cannot contain an underscore: {}",
                id
            )));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(Error::invalid_dataset(format!(
                "Dataset id cannot contain whitespace: {:?}",
                id
            )));
        }
        Ok(())
    }

    /// Returns the dataset id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the dataset kind.
    #[inline]
    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    /// Returns the rows.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
