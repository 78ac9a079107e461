//! Compiled query definitions: columns, ordering and transformations.

use crate::ast::{Attribute, FilterSpec};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Aggregation rule of an APPLY entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApplyRule {
    Max,
    Min,
    Avg,
    Sum,
    Count,
}

impl ApplyRule {
    /// Parses an APPLY rule key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "MAX" => Some(ApplyRule::Max),
            "MIN" => Some(ApplyRule::Min),
            "AVG" => Some(ApplyRule::Avg),
            "SUM" => Some(ApplyRule::Sum),
            "COUNT" => Some(ApplyRule::Count),
            _ => None,
        }
    }

    /// Returns the APPLY rule key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplyRule::Max => "MAX",
            ApplyRule::Min => "MIN",
            ApplyRule::Avg => "AVG",
            ApplyRule::Sum => "SUM",
            ApplyRule::Count => "COUNT",
        }
    }

    /// Returns true if the rule only accepts numeric fields.
    #[inline]
    pub fn requires_numeric(&self) -> bool {
        !matches!(self, ApplyRule::Count)
    }
}

impl fmt::Display for ApplyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction of an ORDER clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Up,
    Down,
}

impl SortDirection {
    /// Parses an ORDER `dir` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "UP" => Some(SortDirection::Up),
            "DOWN" => Some(SortDirection::Down),
            _ => None,
        }
    }
}

/// One entry of COLUMNS.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnKey {
    /// A dataset field, output as `datasetId_field`.
    Field(Attribute),
    /// An APPLY name, output under its own name.
    Apply(String),
}

impl ColumnKey {
    /// Returns the key this column is output under.
    pub fn output_key(&self) -> String {
        match self {
            ColumnKey::Field(attr) => attr.key(),
            ColumnKey::Apply(name) => name.clone(),
        }
    }

    /// Returns the attribute if this is a field column.
    pub fn as_field(&self) -> Option<&Attribute> {
        match self {
            ColumnKey::Field(attr) => Some(attr),
            ColumnKey::Apply(_) => None,
        }
    }

    /// Returns the apply name if this is an apply column.
    pub fn as_apply(&self) -> Option<&str> {
        match self {
            ColumnKey::Apply(name) => Some(name),
            ColumnKey::Field(_) => None,
        }
    }
}

/// A compiled ORDER clause.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct OrderSpec {
    /// Output keys, in priority order.
    pub keys: Vec<String>,
    pub direction: SortDirection,
}

impl OrderSpec {
    /// Creates an ascending order on a single key.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            keys: alloc::vec![key.into()],
            direction: SortDirection::Up,
        }
    }

    /// Returns the key rows are compared on.
    pub fn primary_key(&self) -> Option<&str> {
        self.keys.first().map(|k| k.as_str())
    }
}

/// A compiled OPTIONS clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// The single dataset the query reads.
    pub dataset_id: String,
    pub columns: Vec<ColumnKey>,
    pub order: Option<OrderSpec>,
}

impl Options {
    /// Returns the apply names requested in COLUMNS.
    pub fn apply_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(ColumnKey::as_apply)
    }

    /// Returns the output keys in COLUMNS order.
    pub fn output_keys(&self) -> Vec<String> {
        self.columns.iter().map(ColumnKey::output_key).collect()
    }
}

/// One named aggregation of an APPLY clause.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplySpec {
    pub name: String,
    pub rule: ApplyRule,
    pub field: Attribute,
}

impl ApplySpec {
    pub fn new(name: impl Into<String>, rule: ApplyRule, field: Attribute) -> Self {
        Self {
            name: name.into(),
            rule,
            field,
        }
    }
}

/// A compiled TRANSFORMATIONS clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformation {
    /// GROUP fields, in GROUP order.
    pub group: Vec<Attribute>,
    pub apply: Vec<ApplySpec>,
}

impl Transformation {
    /// Looks up an apply spec by name.
    pub fn apply_spec(&self, name: &str) -> Option<&ApplySpec> {
        self.apply.iter().find(|spec| spec.name == name)
    }

    /// Returns true if the field is one of the GROUP fields.
    pub fn groups_by(&self, attr: &Attribute) -> bool {
        self.group.iter().any(|g| g == attr)
    }
}

/// A fully compiled query, ready for execution.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// None when WHERE is empty.
    pub filter: Option<FilterSpec>,
    pub options: Options,
    pub transformation: Option<Transformation>,
}

impl Query {
    /// Returns the dataset the query reads.
    #[inline]
    pub fn dataset_id(&self) -> &str {
        &self.options.dataset_id
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: Vec<String> = self.options.output_keys();
        write!(f, "Query[{}] columns={:?}", self.options.dataset_id, columns)?;
        if let Some(filter) = &self.filter {
            write!(f, " filter_nodes={}", filter.node_count())?;
        }
        if let Some(t) = &self.transformation {
            let group: Vec<String> = t.group.iter().map(|a| a.to_string()).collect();
            write!(f, " group={:?} apply={}", group, t.apply.len())?;
        }
        if let Some(order) = &self.options.order {
            write!(f, " order={:?} {:?}", order.keys, order.direction)?;
        }
        Ok(())
    }
}
