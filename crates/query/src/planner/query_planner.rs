//! Query planner: turns a validated query tree into a compiled [`Query`].
//!
//! Compilation runs in a fixed order:
//!
//! 1. **OPTIONS** - columns, the query's dataset id and ORDER
//! 2. **TRANSFORMATIONS** - GROUP and APPLY, cross-checked against COLUMNS
//! 3. **WHERE** - the filter tree, restricted to the query's dataset
//!
//! The planner expects a tree that already passed
//! [`validate_query`](crate::validator::validate_query); it still reports a
//! `Validation` error instead of panicking if handed anything else.

use super::{compile_options, compile_transformation, compile_where, Scope};
use crate::ast::Query;
use crate::context::KindMap;
use alloc::format;
use insight_core::{Error, Result};
use insight_json::JsonValue;
use log::trace;

/// Compiles query trees against the datasets of a context.
pub struct QueryPlanner<'a> {
    kinds: &'a KindMap,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a planner over the given id to kind map.
    pub fn new(kinds: &'a KindMap) -> Self {
        Self { kinds }
    }

    /// Compiles a query tree.
    pub fn plan(&self, query: &JsonValue) -> Result<Query> {
        let root = query
            .as_object()
            .ok_or_else(|| Error::validation("Query must be an object"))?;
        let options = root
            .get("OPTIONS")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::validation("Query missing OPTIONS"))?;
        let transformations = match root.get("TRANSFORMATIONS") {
            Some(value) => Some(
                value
                    .as_object()
                    .ok_or_else(|| Error::validation("TRANSFORMATIONS must be an object"))?,
            ),
            None => None,
        };

        let options = compile_options(options, transformations, self.kinds)?;
        let kind = self.kinds.get(&options.dataset_id).copied().ok_or_else(|| {
            Error::validation(format!(
                "Referenced dataset {} not added yet",
                options.dataset_id
            ))
        })?;
        let scope = Scope::new(options.dataset_id.clone(), kind);

        let transformation = match transformations {
            Some(t) => Some(compile_transformation(t, &scope, &options.columns)?),
            None => None,
        };

        let where_ = root
            .get("WHERE")
            .ok_or_else(|| Error::validation("Query missing WHERE"))?;
        let filter = compile_where(where_, &scope)?;

        let query = Query {
            filter,
            options,
            transformation,
        };
        trace!("compiled {}", query);
        #[cfg(feature = "debug-plan")]
        trace!("plan: {:#?}", query);
        Ok(query)
    }
}
