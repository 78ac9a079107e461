//! Query orchestration.
//!
//! [`execute_query`] runs one query to completion:
//!
//! 1. validate the query tree
//! 2. compile it against the context's datasets
//! 3. filter the dataset rows
//! 4. project them, or group and aggregate them
//! 5. enforce the cardinality cap
//! 6. sort
//!
//! Every step before the cap check is free of side effects, so a failed query
//! leaves nothing behind.

use crate::ast::{ColumnKey, Query};
use crate::context::QueryContext;
use crate::executor::{
    AggregateExecutor, FilterExecutor, LimitExecutor, ProjectExecutor, ResultRow, SortExecutor,
};
use crate::planner::QueryPlanner;
use crate::validator::validate_query;
use alloc::format;
use alloc::vec::Vec;
use insight_core::{Error, Row, Result};
use insight_json::JsonValue;
use log::debug;

/// Validates, compiles and runs a query against the datasets of a context.
pub fn execute_query(ctx: &QueryContext<'_>, query: &JsonValue) -> Result<Vec<ResultRow>> {
    debug!("executing query {}", query);
    validate_query(query)?;
    let plan = QueryPlanner::new(ctx.kinds()).plan(query)?;
    execute_plan(ctx, &plan)
}

/// Runs an already compiled query.
pub fn execute_plan(ctx: &QueryContext<'_>, plan: &Query) -> Result<Vec<ResultRow>> {
    let dataset = ctx.dataset(plan.dataset_id()).ok_or_else(|| {
        Error::validation(format!(
            "Referenced dataset {} not added yet",
            plan.dataset_id()
        ))
    })?;
    debug!(
        "querying dataset {} ({}, {} rows)",
        dataset.id(),
        dataset.kind(),
        dataset.len()
    );

    let rows: Vec<&Row> = match &plan.filter {
        Some(filter) => FilterExecutor::new(filter, dataset.kind()).execute(dataset.rows()),
        None => dataset.rows().iter().collect(),
    };
    debug!("{} row(s) passed the filter", rows.len());

    let results = match &plan.transformation {
        Some(transformation) => {
            let grouped =
                AggregateExecutor::new(transformation, &plan.options.columns).execute(&rows);
            debug!("{} group(s) formed", grouped.len());
            grouped
        }
        None => {
            let fields: Vec<_> = plan
                .options
                .columns
                .iter()
                .filter_map(ColumnKey::as_field)
                .collect();
            ProjectExecutor::new(&fields).execute(&rows)
        }
    };

    let results = LimitExecutor::new(ctx.max_results()).execute(results)?;

    Ok(match plan.options.order.as_ref().and_then(SortExecutor::new) {
        Some(sort) => sort.execute(results),
        None => results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use insight_core::schema::DatasetKind;
    use insight_core::{Dataset, Value};
    use insight_json::JsonObject;

    fn room(name: &str, seats: f64, kind: &str) -> Row {
        Row::new(vec![
            Value::from("Building"),
            Value::from("BLD"),
            Value::from("100"),
            Value::from(name),
            Value::from("1 Main Mall"),
            Value::from(49.26),
            Value::from(-123.25),
            Value::from(seats),
            Value::from(kind),
            Value::from("Movable Tables"),
            Value::from("http://example.org"),
        ])
    }

    fn obj<const N: usize>(entries: [(&str, JsonValue); N]) -> JsonValue {
        JsonValue::Object(entries.into_iter().collect::<JsonObject>())
    }

    fn strs(items: &[&str]) -> JsonValue {
        JsonValue::Array(items.iter().map(|s| JsonValue::from(*s)).collect())
    }

    fn rooms() -> Dataset {
        Dataset::new(
            "rooms",
            DatasetKind::Rooms,
            vec![
                room("BLD_100", 50.0, "Tutorial"),
                room("BLD_200", 400.0, "Lecture"),
                room("BLD_300", 120.0, "Lecture"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_execute_simple() {
        let dataset = rooms();
        let ctx = QueryContext::from_datasets([&dataset]);
        let query = obj([
            ("WHERE", obj([("GT", obj([("rooms_seats", JsonValue::from(100))]))])),
            (
                "OPTIONS",
                obj([
                    ("COLUMNS", strs(&["rooms_name", "rooms_seats"])),
                    ("ORDER", JsonValue::from("rooms_seats")),
                ]),
            ),
        ]);
        let result = execute_query(&ctx, &query).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].get("rooms_name"), Some(&Value::from("BLD_300")));
        assert_eq!(result[1].get("rooms_seats"), Some(&Value::Number(400.0)));
    }

    #[test]
    fn test_execute_grouped() {
        let dataset = rooms();
        let ctx = QueryContext::from_datasets([&dataset]);
        let apply = obj([("total", obj([("SUM", JsonValue::from("rooms_seats"))]))]);
        let query = obj([
            ("WHERE", obj([])),
            ("OPTIONS", obj([("COLUMNS", strs(&["rooms_type", "total"]))])),
            (
                "TRANSFORMATIONS",
                obj([
                    ("GROUP", strs(&["rooms_type"])),
                    ("APPLY", JsonValue::Array(vec![apply])),
                ]),
            ),
        ]);
        let result = execute_query(&ctx, &query).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].get("rooms_type"), Some(&Value::from("Tutorial")));
        assert_eq!(result[1].get("total"), Some(&Value::Number(520.0)));
    }

    #[test]
    fn test_execute_cap() {
        let dataset = rooms();
        let ctx = QueryContext::from_datasets([&dataset]).with_max_results(2);
        let query = obj([
            ("WHERE", obj([])),
            ("OPTIONS", obj([("COLUMNS", strs(&["rooms_name"]))])),
        ]);
        let err = execute_query(&ctx, &query).unwrap_err();
        assert_eq!(err, Error::result_too_large(2, 3));
    }

    #[test]
    fn test_execute_unknown_dataset() {
        let ctx = QueryContext::new();
        let query = obj([
            ("WHERE", obj([])),
            ("OPTIONS", obj([("COLUMNS", strs(&["rooms_name"]))])),
        ]);
        assert!(execute_query(&ctx, &query).unwrap_err().is_validation());
    }
}
