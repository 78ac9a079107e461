//! Insight Core - Core types and schema catalog for the Insight query engine.
//!
//! This crate provides the foundational types shared by the query engine and
//! the dataset registry:
//!
//! - `DataType`: Semantic field types (String, Number)
//! - `Value`: Cell values stored in dataset rows
//! - `Row`: A fixed-schema record laid out in its dataset kind's column order
//! - `Dataset`: An identified, immutable collection of rows of one kind
//! - `schema`: The per-kind schema catalog (`DatasetKind`, `Column`)
//! - `pattern_match`: `*` wildcard matching for `IS` filters
//! - `Error`: Error types shared across the workspace
//!
//! # Example
//!
//! ```rust
//! use insight_core::{DataType, Dataset, Row, Value};
//! use insight_core::schema::DatasetKind;
//!
//! assert_eq!(DatasetKind::Rooms.field_type("seats"), Some(DataType::Number));
//! assert_eq!(DatasetKind::Sections.field_type("seats"), None);
//!
//! let row = Row::new(vec![
//!     Value::from("cpsc"),
//!     Value::from("310"),
//!     Value::from(84.5),
//!     Value::from("holmes"),
//!     Value::from("intro sw eng"),
//!     Value::from(120),
//!     Value::from(4),
//!     Value::from(0),
//!     Value::from("1234"),
//!     Value::from(2015),
//! ]);
//! assert!(row.conforms_to(DatasetKind::Sections));
//!
//! let dataset = Dataset::new("sections", DatasetKind::Sections, vec![row]).unwrap();
//! assert_eq!(dataset.len(), 1);
//! ```

#![no_std]

extern crate alloc;

mod dataset;
mod error;
pub mod pattern_match;
mod row;
pub mod schema;
mod types;
mod value;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use row::Row;
pub use types::DataType;
pub use value::Value;
