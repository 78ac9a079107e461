//! AST module for compiled queries and filter trees.

mod attribute;
mod expr;
mod predicate;

pub use attribute::Attribute;
pub use expr::{
    ApplyRule, ApplySpec, ColumnKey, Options, OrderSpec, Query, SortDirection, Transformation,
};
pub use predicate::{CompareOp, FilterSpec, Predicate};
