//! Project executor.

use crate::ast::Attribute;
use crate::executor::ResultRow;
use alloc::string::String;
use alloc::vec::Vec;
use insight_core::Row;

/// Project executor - builds one output row per input row.
pub struct ProjectExecutor {
    /// Output key and column index of every projected field.
    columns: Vec<(String, usize)>,
}

impl ProjectExecutor {
    /// Creates a new project executor over the given fields, in output order.
    pub fn new(fields: &[&Attribute]) -> Self {
        Self {
            columns: fields.iter().map(|a| (a.key(), a.index)).collect(),
        }
    }

    /// Executes the projection. A cell missing from a row is left out of its
    /// output row.
    pub fn execute(&self, rows: &[&Row]) -> Vec<ResultRow> {
        rows.iter().map(|row| self.project(row)).collect()
    }

    fn project(&self, row: &Row) -> ResultRow {
        let mut out = ResultRow::with_capacity(self.columns.len());
        for (key, index) in &self.columns {
            if let Some(value) = row.get(*index) {
                out.push(key.as_str(), value.clone());
            }
        }
        out
    }
}
