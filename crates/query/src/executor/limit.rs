//! Limit executor.

use crate::context::DEFAULT_MAX_RESULTS;
use crate::executor::ResultRow;
use alloc::vec::Vec;
use insight_core::{Error, Result};
use log::warn;

/// Limit executor - enforces the result cardinality cap.
///
/// The cap is not a truncation: a result over the cap fails as a whole.
pub struct LimitExecutor {
    max_rows: usize,
}

impl LimitExecutor {
    /// Creates a limit executor with the given cap.
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    /// Returns the cap.
    #[inline]
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Passes the rows through, or fails if there are more than the cap.
    pub fn execute(&self, rows: Vec<ResultRow>) -> Result<Vec<ResultRow>> {
        if rows.len() > self.max_rows {
            warn!(
                "result of {} rows exceeds the cap of {}",
                rows.len(),
                self.max_rows
            );
            return Err(Error::result_too_large(self.max_rows, rows.len()));
        }
        Ok(rows)
    }
}

impl Default for LimitExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_limit_at_cap() {
        let executor = LimitExecutor::new(3);
        let rows = vec![ResultRow::new(), ResultRow::new(), ResultRow::new()];
        assert_eq!(executor.execute(rows).unwrap().len(), 3);
    }

    #[test]
    fn test_limit_over_cap() {
        let executor = LimitExecutor::new(2);
        let rows = vec![ResultRow::new(), ResultRow::new(), ResultRow::new()];
        let err = executor.execute(rows).unwrap_err();
        assert_eq!(err, Error::result_too_large(2, 3));
    }

    #[test]
    fn test_limit_default() {
        assert_eq!(LimitExecutor::default().max_rows(), 5000);
    }
}
