//! TRANSFORMATIONS compilation.

use super::Scope;
use crate::ast::{ApplyRule, ApplySpec, ColumnKey, Transformation};
use crate::resolver::is_apply_name;
use alloc::format;
use alloc::vec::Vec;
use hashbrown::HashSet;
use insight_core::{Error, Result};
use insight_json::{JsonObject, JsonValue};

/// Compiles a TRANSFORMATIONS object and cross-checks it against COLUMNS.
pub fn compile_transformation(
    obj: &JsonObject,
    scope: &Scope,
    columns: &[ColumnKey],
) -> Result<Transformation> {
    let group = obj
        .get("GROUP")
        .and_then(JsonValue::as_array)
        .filter(|g| !g.is_empty())
        .ok_or_else(|| Error::validation("GROUP must be a non-empty array"))?
        .iter()
        .map(|key| {
            let key = key
                .as_str()
                .ok_or_else(|| Error::validation("GROUP keys must be strings"))?;
            scope.resolve(key)
        })
        .collect::<Result<Vec<_>>>()?;

    let entries = obj
        .get("APPLY")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::validation("APPLY must be an array"))?;
    let mut seen = HashSet::with_capacity(entries.len());
    let mut apply = Vec::with_capacity(entries.len());
    for entry in entries {
        let spec = compile_apply_entry(entry, scope)?;
        if !seen.insert(spec.name.clone()) {
            return Err(Error::validation(format!(
                "Duplicate APPLY key {}",
                spec.name
            )));
        }
        apply.push(spec);
    }

    let transformation = Transformation { group, apply };
    for column in columns {
        match column {
            ColumnKey::Apply(name) if transformation.apply_spec(name).is_none() => {
                return Err(Error::validation(format!(
                    "Invalid key {} in COLUMNS: not an APPLY key",
                    name
                )))
            }
            ColumnKey::Field(attr) if !transformation.groups_by(attr) => {
                return Err(Error::validation(format!(
                    "Keys in COLUMNS must be in GROUP or APPLY when TRANSFORMATIONS is present: {}",
                    attr
                )))
            }
            _ => {}
        }
    }
    Ok(transformation)
}

fn compile_apply_entry(entry: &JsonValue, scope: &Scope) -> Result<ApplySpec> {
    let (name, body) = entry
        .as_object()
        .filter(|o| o.len() == 1)
        .and_then(JsonObject::first)
        .ok_or_else(|| Error::validation("APPLY rule must have exactly one key"))?;
    if !is_apply_name(name) {
        return Err(Error::validation(format!(
            "Cannot have underscore in applyKey {:?}",
            name
        )));
    }

    let (rule_key, target) = body
        .as_object()
        .filter(|o| o.len() == 1)
        .and_then(JsonObject::first)
        .ok_or_else(|| Error::validation(format!("APPLY body of {} must have exactly one key", name)))?;
    let rule = ApplyRule::from_key(rule_key)
        .ok_or_else(|| Error::validation(format!("Invalid transformation operator {}", rule_key)))?;
    let key = target
        .as_str()
        .ok_or_else(|| Error::validation(format!("Invalid key type in {}", rule)))?;
    let field = scope.resolve(key)?;
    if rule.requires_numeric() && !field.is_numeric() {
        return Err(Error::validation(format!(
            "Invalid key type in {}: {} is not numeric",
            rule, key
        )));
    }
    Ok(ApplySpec::new(name, rule, field))
}
