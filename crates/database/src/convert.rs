//! Type conversion utilities between value trees and dataset rows.
//!
//! Rows arrive as objects keyed by bare field names (`{"dept": "cpsc", ...}`)
//! and are laid out in the column order of their dataset kind.

use insight_core::schema::DatasetKind;
use insight_core::{DataType, Error, Result, Row, Value};
use insight_json::{JsonObject, JsonValue};
use insight_query::executor::value_to_json;
use log::trace;

/// Converts a value-tree value to a cell value of the expected type.
pub fn json_to_value(json: &JsonValue, expected_type: DataType) -> Result<Value> {
    match (expected_type, json) {
        (DataType::Number, JsonValue::Number(n)) if n.is_finite() => Ok(Value::Number(*n)),
        (DataType::String, JsonValue::String(s)) => Ok(Value::String(s.clone())),
        _ => Err(Error::invalid_dataset(format!(
            "Expected {} value, found {}",
            expected_type,
            json.type_name()
        ))),
    }
}

/// Converts an object keyed by field name to a row of the given kind.
///
/// Every column of the kind must be present with its declared type. Keys
/// that are not columns are ignored.
pub fn json_to_row(json: &JsonValue, kind: DatasetKind) -> Result<Row> {
    let obj = json
        .as_object()
        .ok_or_else(|| Error::invalid_dataset("Expected object value"))?;

    let columns = kind.columns();
    let mut values = Vec::with_capacity(columns.len());
    for col in columns {
        let prop = obj
            .get(col.name())
            .ok_or_else(|| Error::invalid_dataset(format!("Missing column: {}", col.name())))?;
        values.push(json_to_value(prop, col.data_type())?);
    }
    Ok(Row::new(values))
}

/// Converts a row to an object keyed by field name.
pub fn row_to_json(row: &Row, kind: DatasetKind) -> JsonValue {
    let mut obj = JsonObject::with_capacity(row.len());
    for (col, value) in kind.columns().iter().zip(row.values()) {
        obj.insert(col.name().to_string(), value_to_json(value.clone()));
    }
    JsonValue::Object(obj)
}

/// Converts an array of objects to rows, skipping the objects that do not
/// describe a valid row. Returns the rows and the number skipped.
pub fn json_array_to_rows(json: &JsonValue, kind: DatasetKind) -> Result<(Vec<Row>, usize)> {
    let items = json
        .as_array()
        .ok_or_else(|| Error::invalid_dataset("Expected array value"))?;

    let mut rows = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (i, item) in items.iter().enumerate() {
        match json_to_row(item, kind) {
            Ok(row) => rows.push(row),
            Err(e) => {
                trace!("skipping {} entry {}: {}", kind, i, e);
                skipped += 1;
            }
        }
    }
    Ok((rows, skipped))
}
