//! Sort executor.

use crate::ast::{OrderSpec, SortDirection};
use crate::executor::ResultRow;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Sort executor - orders result rows by the first ORDER key.
///
/// Later ORDER keys do not break ties: rows that compare equal on the first
/// key keep their relative order (ascending) or have it reversed (DOWN).
pub struct SortExecutor {
    key: String,
    direction: SortDirection,
}

impl SortExecutor {
    /// Creates a sort executor for an ORDER clause. Returns None when the
    /// clause names no key.
    pub fn new(order: &OrderSpec) -> Option<Self> {
        order.primary_key().map(|key| Self {
            key: key.into(),
            direction: order.direction,
        })
    }

    /// Executes the sort.
    pub fn execute(&self, mut rows: Vec<ResultRow>) -> Vec<ResultRow> {
        rows.sort_by(|a, b| self.compare_rows(a, b));
        if self.direction == SortDirection::Down {
            rows.reverse();
        }
        rows
    }

    fn compare_rows(&self, a: &ResultRow, b: &ResultRow) -> Ordering {
        match (a.get(&self.key), b.get(&self.key)) {
            (Some(av), Some(bv)) => av.cmp(bv),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use insight_core::Value;

    fn row(seats: f64, name: &str) -> ResultRow {
        [
            ("rooms_seats", Value::from(seats)),
            ("rooms_name", Value::from(name)),
        ]
        .into_iter()
        .collect()
    }

    fn names(rows: &[ResultRow]) -> Vec<&str> {
        rows.iter()
            .map(|r| r.get("rooms_name").and_then(|v| v.as_str()).unwrap_or(""))
            .collect()
    }

    fn order(keys: &[&str], direction: SortDirection) -> OrderSpec {
        OrderSpec {
            keys: keys.iter().map(|k| String::from(*k)).collect(),
            direction,
        }
    }

    #[test]
    fn test_sort_ascending() {
        let rows = vec![row(30.0, "c"), row(10.0, "a"), row(20.0, "b")];
        let executor = SortExecutor::new(&OrderSpec::ascending("rooms_seats")).unwrap();
        assert_eq!(names(&executor.execute(rows)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_strings() {
        let rows = vec![row(1.0, "DMP_110"), row(2.0, "ANGU_098"), row(3.0, "BIOL_2000")];
        let executor = SortExecutor::new(&OrderSpec::ascending("rooms_name")).unwrap();
        assert_eq!(
            names(&executor.execute(rows)),
            vec!["ANGU_098", "BIOL_2000", "DMP_110"]
        );
    }

    #[test]
    fn test_sort_is_stable_on_first_key_only() {
        let rows = vec![row(10.0, "z"), row(5.0, "m"), row(10.0, "a")];
        let executor =
            SortExecutor::new(&order(&["rooms_seats", "rooms_name"], SortDirection::Up)).unwrap();
        assert_eq!(names(&executor.execute(rows)), vec!["m", "z", "a"]);
    }

    #[test]
    fn test_sort_down_reverses() {
        let rows = vec![row(10.0, "z"), row(5.0, "m"), row(10.0, "a")];
        let executor =
            SortExecutor::new(&order(&["rooms_seats", "rooms_name"], SortDirection::Down))
                .unwrap();
        assert_eq!(names(&executor.execute(rows)), vec!["a", "z", "m"]);
    }

    #[test]
    fn test_missing_key_sorts_first() {
        let mut partial = ResultRow::new();
        partial.push("rooms_name", Value::from("x"));
        let rows = vec![row(1.0, "a"), partial];
        let executor = SortExecutor::new(&OrderSpec::ascending("rooms_seats")).unwrap();
        assert_eq!(names(&executor.execute(rows)), vec!["x", "a"]);
    }

    #[test]
    fn test_no_key() {
        assert!(SortExecutor::new(&order(&[], SortDirection::Up)).is_none());
    }
}
