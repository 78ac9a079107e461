//! Filter executor.

use crate::ast::Predicate;
use alloc::vec::Vec;
use insight_core::schema::DatasetKind;
use insight_core::Row;
use log::warn;

/// Filter executor - keeps the rows a predicate matches.
///
/// Rows that do not conform to the dataset kind never match, whatever the
/// predicate says about them.
pub struct FilterExecutor<P: Predicate> {
    predicate: P,
    kind: DatasetKind,
}

impl<P: Predicate> FilterExecutor<P> {
    /// Creates a new filter executor.
    pub fn new(predicate: P, kind: DatasetKind) -> Self {
        Self { predicate, kind }
    }

    /// Executes the filter, preserving row order.
    pub fn execute<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        let mut malformed = 0usize;
        let matched: Vec<&Row> = rows
            .iter()
            .filter(|row| {
                if !row.conforms_to(self.kind) {
                    malformed += 1;
                    return false;
                }
                self.predicate.eval(row)
            })
            .collect();
        if malformed > 0 {
            warn!("skipped {} malformed {} row(s)", malformed, self.kind);
        }
        matched
    }
}
