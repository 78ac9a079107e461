//! Filter tree definitions for query filtering.

use crate::ast::Attribute;
use alloc::boxed::Box;
use alloc::vec::Vec;
use insight_core::pattern_match::WildcardPattern;
use insight_core::Row;

/// Numeric comparison operator of a `LT`/`GT`/`EQ` filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
}

impl CompareOp {
    /// Parses a WHERE operator key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "LT" => Some(CompareOp::Lt),
            "GT" => Some(CompareOp::Gt),
            "EQ" => Some(CompareOp::Eq),
            _ => None,
        }
    }

    /// Returns the WHERE operator key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "LT",
            CompareOp::Gt => "GT",
            CompareOp::Eq => "EQ",
        }
    }

    /// Applies the operator to a cell value and the filter operand.
    #[inline]
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Eq => lhs == rhs,
        }
    }
}

/// A predicate that can be evaluated against rows.
pub trait Predicate {
    /// Evaluates the predicate against a row.
    fn eval(&self, row: &Row) -> bool;

    /// Returns the attributes referenced by this predicate.
    fn attributes(&self) -> Vec<&Attribute>;
}

impl<P: Predicate + ?Sized> Predicate for &P {
    fn eval(&self, row: &Row) -> bool {
        (**self).eval(row)
    }

    fn attributes(&self) -> Vec<&Attribute> {
        (**self).attributes()
    }
}

/// A compiled WHERE clause.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterSpec {
    /// Every child must match.
    And(Vec<FilterSpec>),
    /// At least one child must match.
    Or(Vec<FilterSpec>),
    /// The child must not match.
    Not(Box<FilterSpec>),
    /// Numeric comparison of a field against a constant.
    Compare {
        op: CompareOp,
        field: Attribute,
        value: f64,
    },
    /// Wildcard string match of a field.
    Match {
        field: Attribute,
        pattern: WildcardPattern,
    },
}

impl FilterSpec {
    /// Creates an `And` node.
    pub fn and(children: Vec<FilterSpec>) -> Self {
        FilterSpec::And(children)
    }

    /// Creates an `Or` node.
    pub fn or(children: Vec<FilterSpec>) -> Self {
        FilterSpec::Or(children)
    }

    /// Creates a `Not` node.
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: FilterSpec) -> Self {
        FilterSpec::Not(Box::new(child))
    }

    /// Creates a `Compare` node.
    pub fn compare(op: CompareOp, field: Attribute, value: f64) -> Self {
        FilterSpec::Compare { op, field, value }
    }

    /// Creates a `Match` node.
    pub fn matches(field: Attribute, pattern: WildcardPattern) -> Self {
        FilterSpec::Match { field, pattern }
    }

    /// Returns the number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        match self {
            FilterSpec::And(children) | FilterSpec::Or(children) => {
                1 + children.iter().map(FilterSpec::node_count).sum::<usize>()
            }
            FilterSpec::Not(child) => 1 + child.node_count(),
            FilterSpec::Compare { .. } | FilterSpec::Match { .. } => 1,
        }
    }

    fn collect_attributes<'a>(&'a self, out: &mut Vec<&'a Attribute>) {
        match self {
            FilterSpec::And(children) | FilterSpec::Or(children) => {
                for child in children {
                    child.collect_attributes(out);
                }
            }
            FilterSpec::Not(child) => child.collect_attributes(out),
            FilterSpec::Compare { field, .. } | FilterSpec::Match { field, .. } => out.push(field),
        }
    }
}

impl Predicate for FilterSpec {
    /// A leaf whose cell is missing or has the wrong type evaluates to false.
    fn eval(&self, row: &Row) -> bool {
        match self {
            FilterSpec::And(children) => children.iter().all(|c| c.eval(row)),
            FilterSpec::Or(children) => children.iter().any(|c| c.eval(row)),
            FilterSpec::Not(child) => !child.eval(row),
            FilterSpec::Compare { op, field, value } => row
                .get(field.index)
                .and_then(|v| v.as_f64())
                .map_or(false, |cell| op.apply(cell, *value)),
            FilterSpec::Match { field, pattern } => row
                .get(field.index)
                .and_then(|v| v.as_str())
                .map_or(false, |cell| pattern.matches(cell)),
        }
    }

    fn attributes(&self) -> Vec<&Attribute> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out
    }
}
