//! Insight Database - In-memory dataset registry for the Insight query engine.
//!
//! This crate provides the collaborator-facing API around the query engine:
//!
//! - `Database`: Add, remove and list datasets, and run queries against them
//! - `DatabaseConfig`: Engine settings such as the result cardinality cap
//! - `DatasetCache`: Storage of loaded datasets by id
//! - `convert`: Conversion between value-tree objects and dataset rows
//!
//! # Example
//!
//! ```rust
//! use insight_core::schema::DatasetKind;
//! use insight_database::Database;
//! use insight_json::{JsonObject, JsonValue};
//!
//! let room: JsonObject = [
//!     ("fullname", JsonValue::from("Hebb")),
//!     ("shortname", JsonValue::from("HEBB")),
//!     ("number", JsonValue::from("100")),
//!     ("name", JsonValue::from("HEBB_100")),
//!     ("address", JsonValue::from("2045 East Mall")),
//!     ("lat", JsonValue::from(49.2661)),
//!     ("lon", JsonValue::from(-123.25165)),
//!     ("seats", JsonValue::from(375)),
//!     ("type", JsonValue::from("Tiered Large Group")),
//!     ("furniture", JsonValue::from("Classroom-Fixed Tables/Fixed Chairs")),
//!     ("href", JsonValue::from("http://example.org/HEBB-100")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut db = Database::default();
//! let ids = db
//!     .add_dataset_from_json("rooms", DatasetKind::Rooms, &JsonValue::from(vec![room.into()]))
//!     .unwrap();
//! assert_eq!(ids, vec!["rooms"]);
//! assert_eq!(db.list_datasets()[0].num_rows, 1);
//! ```

pub mod cache;
pub mod config;
pub mod convert;
pub mod database;

pub use cache::DatasetCache;
pub use config::DatabaseConfig;
pub use database::{Database, DatasetInfo};
