//! Aggregate executor.

use crate::ast::{ApplyRule, ApplySpec, Attribute, ColumnKey, Transformation};
use crate::executor::ResultRow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use hashbrown::{HashMap, HashSet};
use insight_core::{Row, Value};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Separates the stringified values of a composite group key.
const KEY_SEPARATOR: char = '\u{1f}';

/// Decimal places SUM and AVG results are rounded to.
const RESULT_SCALE: u32 = 2;

/// One output column of a grouped result.
enum Output {
    /// A GROUP field, taken from the group's first row.
    Group(String, usize),
    /// An apply spec, reduced over the whole group.
    Apply(ApplySpec),
}

/// Aggregate executor - groups rows and reduces every group to one row.
pub struct AggregateExecutor {
    /// Group by column indices.
    group_by: Vec<usize>,
    outputs: Vec<Output>,
}

impl AggregateExecutor {
    /// Creates an executor emitting the given columns. Apply specs that no
    /// column asks for are not computed.
    pub fn new(transformation: &Transformation, columns: &[ColumnKey]) -> Self {
        let outputs = columns
            .iter()
            .filter_map(|column| match column {
                ColumnKey::Field(attr) => Some(Output::Group(attr.key(), attr.index)),
                ColumnKey::Apply(name) => transformation.apply_spec(name).cloned().map(Output::Apply),
            })
            .collect();
        Self {
            group_by: transformation.group.iter().map(|a| a.index).collect(),
            outputs,
        }
    }

    /// Groups the rows by their composite key, in first-seen order.
    pub fn group<'a>(&self, rows: &[&'a Row]) -> Vec<Vec<&'a Row>> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Row>> = Vec::new();
        let mut key = String::new();
        for &row in rows {
            self.make_group_key(row, &mut key);
            match index.get(key.as_str()) {
                Some(&i) => groups[i].push(row),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(alloc::vec![row]);
                }
            }
        }
        groups
    }

    /// Executes the grouping and the reductions.
    pub fn execute(&self, rows: &[&Row]) -> Vec<ResultRow> {
        self.group(rows)
            .iter()
            .map(|group| self.reduce_group(group))
            .collect()
    }

    fn make_group_key(&self, row: &Row, key: &mut String) {
        key.clear();
        for (i, &idx) in self.group_by.iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            if let Some(value) = row.get(idx) {
                let _ = write!(key, "{}", value);
            }
        }
    }

    fn reduce_group(&self, group: &[&Row]) -> ResultRow {
        let mut out = ResultRow::with_capacity(self.outputs.len());
        for output in &self.outputs {
            match output {
                Output::Group(key, idx) => {
                    if let Some(value) = group.first().and_then(|row| row.get(*idx)) {
                        out.push(key.as_str(), value.clone());
                    }
                }
                Output::Apply(spec) => {
                    if let Some(value) = reduce(spec.rule, &spec.field, group) {
                        out.push(spec.name.as_str(), value);
                    }
                }
            }
        }
        out
    }
}

/// Reduces a field over a group. Returns None when no row of the group holds
/// a usable value.
pub fn reduce(rule: ApplyRule, field: &Attribute, group: &[&Row]) -> Option<Value> {
    let values = group.iter().filter_map(|row| row.get(field.index));
    match rule {
        ApplyRule::Count => {
            let distinct: HashSet<&Value> = values.collect();
            Some(Value::Number(distinct.len() as f64))
        }
        ApplyRule::Max => numbers(values).reduce(f64::max).map(Value::Number),
        ApplyRule::Min => numbers(values).reduce(f64::min).map(Value::Number),
        ApplyRule::Sum => total(numbers(values))?.round(),
        ApplyRule::Avg => total(numbers(values))?.mean(group.len()),
    }
}

fn numbers<'a>(values: impl Iterator<Item = &'a Value>) -> impl Iterator<Item = f64> {
    values.filter_map(Value::as_f64)
}

/// Sum of a group's numbers.
enum Total {
    Exact(Decimal),
    /// Some value, or the running sum, left the decimal range.
    Float(f64),
}

/// Sums numbers exactly in decimal, or in f64 when any value or partial sum
/// has no decimal form. Returns None for an empty input.
fn total(values: impl Iterator<Item = f64>) -> Option<Total> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return None;
    }
    let exact = values.iter().try_fold(Decimal::ZERO, |sum, &v| {
        Decimal::from_f64(v).and_then(|d| sum.checked_add(d))
    });
    Some(match exact {
        Some(sum) => Total::Exact(sum),
        None => Total::Float(values.iter().sum()),
    })
}

impl Total {
    fn round(self) -> Option<Value> {
        match self {
            Total::Exact(sum) => to_number(sum),
            Total::Float(sum) => Some(Value::Number(round_float(sum))),
        }
    }

    /// Divides by the group size, rounding once at the end.
    fn mean(self, size: usize) -> Option<Value> {
        match self {
            Total::Exact(sum) => sum.checked_div(Decimal::from(size)).and_then(to_number),
            Total::Float(sum) => Some(Value::Number(round_float(sum / size as f64))),
        }
    }
}

/// Rounds half away from zero to two places and converts back to a number.
///
/// The rounded mantissa and its power of ten are both exact in f64, so the
/// single division yields the closest f64 to the decimal result.
fn to_number(d: Decimal) -> Option<Value> {
    let rounded = d.round_dp_with_strategy(RESULT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let divisor = 10u64.checked_pow(rounded.scale())? as f64;
    Some(Value::Number(rounded.mantissa() as f64 / divisor))
}

/// Rounds an f64 half away from zero to two places.
fn round_float(x: f64) -> f64 {
    // 2^52: from here on every f64 is a whole number
    const EXACT: f64 = 4_503_599_627_370_496.0;
    let scaled = x * 100.0;
    if !scaled.is_finite() || scaled.abs() >= EXACT {
        return x;
    }
    let whole = scaled as i64;
    let frac = scaled - whole as f64;
    let rounded = if frac >= 0.5 {
        whole + 1
    } else if frac <= -0.5 {
        whole - 1
    } else {
        whole
    };
    rounded as f64 / 100.0
}
