//! Schema catalog for Insight datasets.
//!
//! Each dataset kind has a fixed, ordered set of columns. Rows store their
//! values in that order, and qualified query keys resolve against it.

mod column;
mod kind;

pub use column::Column;
pub use kind::{DatasetKind, ROOMS_COLUMNS, SECTIONS_COLUMNS};
