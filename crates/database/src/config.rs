//! Database configuration.

use insight_query::DEFAULT_MAX_RESULTS;

/// Settings applied to every query a [`Database`](crate::Database) runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Largest result a query may return before failing.
    pub max_result_rows: usize,
}

impl DatabaseConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            max_result_rows: DEFAULT_MAX_RESULTS,
        }
    }

    /// Sets the result cardinality cap.
    pub fn max_result_rows(mut self, max_result_rows: usize) -> Self {
        self.max_result_rows = max_result_rows;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new()
    }
}
