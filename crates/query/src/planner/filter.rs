//! WHERE compilation.

use super::Scope;
use crate::ast::{CompareOp, FilterSpec};
use alloc::format;
use alloc::vec::Vec;
use insight_core::pattern_match::WildcardPattern;
use insight_core::{DataType, Error, Result};
use insight_json::{JsonObject, JsonValue};

/// Compiles the top-level WHERE object.
///
/// An empty WHERE matches every row and compiles to `None`.
pub fn compile_where(where_: &JsonValue, scope: &Scope) -> Result<Option<FilterSpec>> {
    let obj = where_
        .as_object()
        .ok_or_else(|| Error::validation("WHERE must be an object"))?;
    if obj.is_empty() {
        return Ok(None);
    }
    compile_filter(obj, scope).map(Some)
}

/// Compiles a nested filter object, which must hold exactly one operator.
pub fn compile_filter(obj: &JsonObject, scope: &Scope) -> Result<FilterSpec> {
    let (op, body) = match (obj.len(), obj.first()) {
        (1, Some(entry)) => entry,
        (0, _) => return Err(Error::validation("Filter must specify an operator")),
        (n, _) => {
            return Err(Error::validation(format!(
                "Filter must specify exactly one operator, found {}",
                n
            )))
        }
    };

    match op {
        "AND" | "OR" => {
            let operands = body
                .as_array()
                .filter(|a| !a.is_empty())
                .ok_or_else(|| Error::validation(format!("{} must be a non-empty array", op)))?;
            let children = operands
                .iter()
                .map(|child| {
                    let child = child.as_object().ok_or_else(|| {
                        Error::validation(format!("{} operands must be objects", op))
                    })?;
                    compile_filter(child, scope)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(if op == "AND" {
                FilterSpec::and(children)
            } else {
                FilterSpec::or(children)
            })
        }
        "NOT" => {
            let child = body
                .as_object()
                .ok_or_else(|| Error::validation("NOT must be an object"))?;
            Ok(FilterSpec::not(compile_filter(child, scope)?))
        }
        "IS" => {
            let (key, value) = single_entry(op, body)?;
            let field = scope.resolve(key)?;
            if field.data_type != DataType::String {
                return Err(Error::validation(format!("IS needs a string field, {} is not", key)));
            }
            let pattern = value
                .as_str()
                .ok_or_else(|| Error::validation(format!("Invalid value type in IS: {}", value)))?;
            Ok(FilterSpec::matches(field, WildcardPattern::parse(pattern)?))
        }
        _ => {
            let cmp = CompareOp::from_key(op)
                .ok_or_else(|| Error::validation(format!("Invalid filter key {}", op)))?;
            let (key, value) = single_entry(op, body)?;
            let field = scope.resolve(key)?;
            if field.data_type != DataType::Number {
                return Err(Error::validation(format!(
                    "{} needs a numeric field, {} is not",
                    op, key
                )));
            }
            let value = value.as_f64().ok_or_else(|| {
                Error::validation(format!("Invalid value type in {}: {}", op, value))
            })?;
            Ok(FilterSpec::compare(cmp, field, value))
        }
    }
}

fn single_entry<'a>(op: &str, body: &'a JsonValue) -> Result<(&'a str, &'a JsonValue)> {
    let obj = body
        .as_object()
        .ok_or_else(|| Error::validation(format!("{} must be an object", op)))?;
    match (obj.len(), obj.first()) {
        (1, Some(entry)) => Ok(entry),
        (n, _) => Err(Error::validation(format!(
            "{} must have exactly one key, found {}",
            op, n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Predicate;
    use alloc::string::ToString;
    use alloc::vec;
    use insight_core::schema::DatasetKind;

    fn scope() -> Scope {
        Scope::new("rooms", DatasetKind::Rooms)
    }

    fn obj<const N: usize>(entries: [(&str, JsonValue); N]) -> JsonValue {
        JsonValue::Object(entries.into_iter().collect())
    }

    fn compile(v: &JsonValue) -> Result<Option<FilterSpec>> {
        compile_where(v, &scope())
    }

    #[test]
    fn test_empty_where() {
        assert_eq!(compile(&obj([])).unwrap(), None);
    }

    #[test]
    fn test_compare_leaf() {
        let filter = compile(&obj([("GT", obj([("rooms_seats", JsonValue::from(300))]))]))
            .unwrap()
            .unwrap();
        match filter {
            FilterSpec::Compare { op, field, value } => {
                assert_eq!(op, CompareOp::Gt);
                assert_eq!(field.field, "seats");
                assert_eq!(value, 300.0);
            }
            other => panic!("unexpected filter {:?}", other),
        }
    }

    #[test]
    fn test_is_leaf() {
        let filter = compile(&obj([("IS", obj([("rooms_type", JsonValue::from("*Group"))]))]))
            .unwrap()
            .unwrap();
        match filter {
            FilterSpec::Match { pattern, .. } => {
                assert!(pattern.prefix_wildcard());
                assert_eq!(pattern.literal(), "Group");
            }
            other => panic!("unexpected filter {:?}", other),
        }
    }

    #[test]
    fn test_nested_logic() {
        let where_ = obj([(
            "AND",
            JsonValue::Array(vec![
                obj([("GT", obj([("rooms_seats", JsonValue::from(10))]))]),
                obj([(
                    "NOT",
                    obj([(
                        "OR",
                        JsonValue::Array(vec![
                            obj([("IS", obj([("rooms_type", JsonValue::from("Lab"))]))]),
                            obj([("EQ", obj([("rooms_lat", JsonValue::from(49.2))]))]),
                        ]),
                    )]),
                )]),
            ]),
        )]);
        let filter = compile(&where_).unwrap().unwrap();
        assert_eq!(filter.node_count(), 6);
        assert_eq!(filter.attributes().len(), 3);
    }

    #[test]
    fn test_type_mismatches() {
        let cases = [
            obj([("GT", obj([("rooms_type", JsonValue::from(1))]))]),
            obj([("GT", obj([("rooms_seats", JsonValue::from("1"))]))]),
            obj([("IS", obj([("rooms_seats", JsonValue::from("1"))]))]),
            obj([("IS", obj([("rooms_type", JsonValue::from(1))]))]),
        ];
        for case in &cases {
            assert!(compile(case).unwrap_err().is_validation(), "{}", case);
        }
    }

    #[test]
    fn test_structural_errors() {
        let cases = [
            obj([("AND", JsonValue::Array(vec![]))]),
            obj([("OR", obj([]))]),
            obj([("AND", JsonValue::Array(vec![obj([])]))]),
            obj([("NOT", obj([]))]),
            obj([("NOT", JsonValue::Array(vec![]))]),
            obj([("GT", obj([]))]),
            obj([(
                "LT",
                obj([
                    ("rooms_seats", JsonValue::from(1)),
                    ("rooms_lat", JsonValue::from(1)),
                ]),
            )]),
            obj([("GE", obj([("rooms_seats", JsonValue::from(1))]))]),
            obj([("IS", obj([("rooms_type", JsonValue::from("L*b"))]))]),
        ];
        for case in &cases {
            assert!(compile(case).is_err(), "{} should not compile", case);
        }
    }

    #[test]
    fn test_foreign_dataset_rejected() {
        let err = compile(&obj([("GT", obj([("courses_avg", JsonValue::from(1))]))]))
            .unwrap_err();
        assert!(err.to_string().contains("courses"));
    }
}
