//! Insight Query - Query engine for Insight datasets.
//!
//! This crate provides the query pipeline including:
//!
//! - `validator`: Rule-table driven structural validation of query trees
//! - `resolver`: Qualified key (`datasetId_field`) resolution
//! - `ast`: Compiled queries, filter trees and transformations
//! - `planner`: Compilation of WHERE, OPTIONS and TRANSFORMATIONS
//! - `executor`: Execution operators (filter, project, aggregate, limit, sort)
//! - `context`: The dataset snapshot a query runs against
//! - `engine`: The `execute_query` entry point
//!
//! # Example
//!
//! ```rust
//! use insight_core::schema::DatasetKind;
//! use insight_core::{Dataset, Row, Value};
//! use insight_json::{JsonObject, JsonValue};
//! use insight_query::context::QueryContext;
//! use insight_query::engine::execute_query;
//!
//! let row = |name: &str, seats: f64| {
//!     Row::new(vec![
//!         Value::from("Hebb"), Value::from("HEBB"), Value::from("100"),
//!         Value::from(name), Value::from("2045 East Mall"), Value::from(49.26),
//!         Value::from(-123.25), Value::from(seats), Value::from("Lecture"),
//!         Value::from("Fixed Tables"), Value::from("http://example.org"),
//!     ])
//! };
//! let rooms = Dataset::new(
//!     "rooms",
//!     DatasetKind::Rooms,
//!     vec![row("HEBB_12", 50.0), row("HEBB_100", 375.0)],
//! )
//! .unwrap();
//! let ctx = QueryContext::from_datasets([&rooms]);
//!
//! let gt: JsonObject = [("rooms_seats", 300)].into_iter().collect();
//! let where_: JsonObject = [("GT", gt)].into_iter().collect();
//! let options: JsonObject = [
//!     ("COLUMNS", JsonValue::from(vec![JsonValue::from("rooms_name")])),
//!     ("ORDER", JsonValue::from("rooms_name")),
//! ]
//! .into_iter()
//! .collect();
//! let query: JsonObject = [("WHERE", where_), ("OPTIONS", options)].into_iter().collect();
//!
//! let result = execute_query(&ctx, &JsonValue::from(query)).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].get("rooms_name"), Some(&Value::from("HEBB_100")));
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod context;
pub mod engine;
pub mod executor;
pub mod planner;
pub mod resolver;
pub mod validator;

pub use context::{KindMap, QueryContext, DEFAULT_MAX_RESULTS};
pub use engine::{execute_plan, execute_query};
pub use executor::ResultRow;
