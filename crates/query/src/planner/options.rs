//! OPTIONS compilation.

use crate::ast::{ColumnKey, Options, OrderSpec, SortDirection};
use crate::context::KindMap;
use crate::resolver::{is_apply_name, resolve, split_key, KindContext};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use insight_core::{Error, Result};
use insight_json::{JsonObject, JsonValue};

/// Compiles an OPTIONS object.
///
/// The query's dataset id is the id of the first qualified COLUMNS key. When
/// COLUMNS only holds apply names, the first GROUP key decides instead.
pub fn compile_options(
    options: &JsonObject,
    transformations: Option<&JsonObject>,
    kinds: &KindMap,
) -> Result<Options> {
    let entries = options
        .get("COLUMNS")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::validation("OPTIONS missing COLUMNS"))?;

    let mut columns = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = entry.as_str().ok_or_else(|| {
            Error::validation(format!(
                "COLUMNS entries must be strings, found {}",
                entry.type_name()
            ))
        })?;
        if is_apply_name(key) {
            if transformations.is_none() {
                return Err(Error::validation(format!(
                    "Invalid key {} in COLUMNS without TRANSFORMATIONS",
                    key
                )));
            }
            columns.push(ColumnKey::Apply(key.to_string()));
        } else {
            columns.push(ColumnKey::Field(resolve(key, KindContext::Map(kinds))?));
        }
    }

    let dataset_id = match columns.iter().find_map(ColumnKey::as_field) {
        Some(attr) => attr.dataset_id.clone(),
        None => group_dataset_id(transformations, kinds)?,
    };
    if let Some(foreign) = columns
        .iter()
        .filter_map(ColumnKey::as_field)
        .find(|attr| attr.dataset_id != dataset_id)
    {
        return Err(Error::validation(format!(
            "Cannot query more than one dataset: {} and {}",
            dataset_id, foreign.dataset_id
        )));
    }

    let order = match options.get("ORDER") {
        Some(order) => Some(compile_order(order, &columns)?),
        None => None,
    };

    Ok(Options {
        dataset_id,
        columns,
        order,
    })
}

fn group_dataset_id(transformations: Option<&JsonObject>, kinds: &KindMap) -> Result<String> {
    let first_group_key = transformations
        .and_then(|t| t.get("GROUP"))
        .and_then(|g| g.get_index(0))
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::validation("Cannot determine the dataset of the query"))?;
    let (dataset_id, _) = split_key(first_group_key)?;
    if !kinds.contains_key(dataset_id) {
        return Err(Error::validation(format!(
            "Referenced dataset {} not added yet",
            dataset_id
        )));
    }
    Ok(dataset_id.to_string())
}

/// Compiles an ORDER value, either the string shorthand or `{dir, keys}`.
pub fn compile_order(order: &JsonValue, columns: &[ColumnKey]) -> Result<OrderSpec> {
    let spec = match order {
        JsonValue::String(key) => OrderSpec::ascending(key.as_str()),
        JsonValue::Object(obj) => {
            let dir = obj
                .get("dir")
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Error::validation("ORDER missing dir"))?;
            let direction = SortDirection::from_key(dir)
                .ok_or_else(|| Error::validation(format!("Invalid ORDER direction {}", dir)))?;
            let keys = obj
                .get("keys")
                .and_then(JsonValue::as_array)
                .ok_or_else(|| Error::validation("ORDER missing keys"))?
                .iter()
                .map(|k| {
                    k.as_str()
                        .map(ToString::to_string)
                        .ok_or_else(|| Error::validation("ORDER keys must be strings"))
                })
                .collect::<Result<Vec<_>>>()?;
            OrderSpec { keys, direction }
        }
        other => {
            return Err(Error::validation(format!(
                "ORDER must be a string or an object, found {}",
                other.type_name()
            )))
        }
    };

    for key in &spec.keys {
        if !columns.iter().any(|c| c.output_key() == *key) {
            return Err(Error::validation(format!(
                "ORDER key {} must be in COLUMNS",
                key
            )));
        }
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use insight_core::schema::DatasetKind;

    fn kinds() -> KindMap {
        let mut kinds = KindMap::new();
        kinds.insert("rooms".into(), DatasetKind::Rooms);
        kinds.insert("courses".into(), DatasetKind::Sections);
        kinds
    }

    fn strs(items: &[&str]) -> JsonValue {
        JsonValue::Array(items.iter().map(|s| JsonValue::from(*s)).collect())
    }

    fn options(columns: &[&str], order: Option<JsonValue>) -> JsonObject {
        let mut obj = JsonObject::new();
        obj.insert("COLUMNS".into(), strs(columns));
        if let Some(order) = order {
            obj.insert("ORDER".into(), order);
        }
        obj
    }

    fn group(keys: &[&str]) -> JsonObject {
        let mut obj = JsonObject::new();
        obj.insert("GROUP".into(), strs(keys));
        obj.insert("APPLY".into(), JsonValue::Array(vec![]));
        obj
    }

    #[test]
    fn test_columns_and_dataset_id() {
        let compiled =
            compile_options(&options(&["rooms_name", "rooms_seats"], None), None, &kinds())
                .unwrap();
        assert_eq!(compiled.dataset_id, "rooms");
        assert_eq!(compiled.output_keys(), vec!["rooms_name", "rooms_seats"]);
        assert!(compiled.order.is_none());
    }

    #[test]
    fn test_apply_column_needs_transformations() {
        let err = compile_options(&options(&["rooms_type", "maxSeats"], None), None, &kinds())
            .unwrap_err();
        assert!(err.to_string().contains("maxSeats"));

        let t = group(&["rooms_type"]);
        let compiled =
            compile_options(&options(&["rooms_type", "maxSeats"], None), Some(&t), &kinds())
                .unwrap();
        assert_eq!(compiled.apply_names().collect::<Vec<_>>(), vec!["maxSeats"]);
    }

    #[test]
    fn test_dataset_id_from_group() {
        let t = group(&["courses_dept"]);
        let compiled = compile_options(&options(&["total"], None), Some(&t), &kinds()).unwrap();
        assert_eq!(compiled.dataset_id, "courses");

        let t = group(&["missing_dept"]);
        assert!(compile_options(&options(&["total"], None), Some(&t), &kinds()).is_err());
    }

    #[test]
    fn test_multiple_datasets_rejected() {
        let err = compile_options(&options(&["rooms_name", "courses_dept"], None), None, &kinds())
            .unwrap_err();
        assert!(err.to_string().contains("more than one dataset"));
    }

    #[test]
    fn test_unknown_column_rejected() {
        assert!(compile_options(&options(&["rooms_avg"], None), None, &kinds()).is_err());
        assert!(compile_options(&options(&["sections_avg"], None), None, &kinds()).is_err());
    }

    #[test]
    fn test_order_shorthand() {
        let compiled = compile_options(
            &options(&["rooms_seats"], Some(JsonValue::from("rooms_seats"))),
            None,
            &kinds(),
        )
        .unwrap();
        assert_eq!(compiled.order, Some(OrderSpec::ascending("rooms_seats")));
    }

    #[test]
    fn test_order_object() {
        let mut order = JsonObject::new();
        order.insert("dir".into(), JsonValue::from("DOWN"));
        order.insert("keys".into(), strs(&["rooms_seats", "rooms_name"]));
        let compiled = compile_options(
            &options(&["rooms_name", "rooms_seats"], Some(JsonValue::Object(order))),
            None,
            &kinds(),
        )
        .unwrap();
        let order = compiled.order.unwrap();
        assert_eq!(order.direction, SortDirection::Down);
        assert_eq!(order.primary_key(), Some("rooms_seats"));
    }

    #[test]
    fn test_order_key_must_be_in_columns() {
        let err = compile_options(
            &options(&["rooms_name"], Some(JsonValue::from("rooms_seats"))),
            None,
            &kinds(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("rooms_seats"));
    }

    #[test]
    fn test_order_direction_checked() {
        let mut order = JsonObject::new();
        order.insert("dir".into(), JsonValue::from("SIDEWAYS"));
        order.insert("keys".into(), strs(&["rooms_name"]));
        assert!(compile_options(
            &options(&["rooms_name"], Some(JsonValue::Object(order))),
            None,
            &kinds(),
        )
        .is_err());
    }
}
