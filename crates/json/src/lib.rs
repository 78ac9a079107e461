//! Insight JSON - Structured value trees for Insight queries and results.
//!
//! Queries reach the engine as an already-parsed value tree and results leave
//! it as one; this crate defines that tree:
//!
//! - `JsonValue`: null, boolean, number, string, array or object
//! - `JsonObject`: an object whose keys keep their insertion order
//!
//! # Example
//!
//! ```rust
//! use insight_json::{JsonObject, JsonValue};
//!
//! let order = JsonValue::from("rooms_seats");
//! let options: JsonObject = [
//!     ("COLUMNS", JsonValue::from(vec![JsonValue::from("rooms_seats")])),
//!     ("ORDER", order),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(options.keys().collect::<Vec<_>>(), vec!["COLUMNS", "ORDER"]);
//! assert_eq!(options.get("ORDER").and_then(|v| v.as_str()), Some("rooms_seats"));
//! ```

#![no_std]

extern crate alloc;

mod value;

pub use value::{JsonObject, JsonValue};
