//! Query compilation.
//!
//! This module compiles a structurally valid query tree into the typed
//! [`Query`](crate::ast::Query) the executors run.

mod filter;
mod options;
mod query_planner;
mod transform;

pub use filter::{compile_filter, compile_where};
pub use options::{compile_options, compile_order};
pub use query_planner::QueryPlanner;
pub use transform::compile_transformation;

use crate::ast::Attribute;
use crate::resolver::{resolve, split_key, KindContext};
use alloc::format;
use alloc::string::String;
use insight_core::schema::DatasetKind;
use insight_core::{Error, Result};

/// The dataset a query is compiled against.
///
/// Every key in WHERE and TRANSFORMATIONS must name this dataset.
#[derive(Clone, Debug)]
pub struct Scope {
    dataset_id: String,
    kind: DatasetKind,
}

impl Scope {
    pub fn new(dataset_id: impl Into<String>, kind: DatasetKind) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            kind,
        }
    }

    #[inline]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    #[inline]
    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    /// Resolves a qualified key, rejecting keys of any other dataset.
    pub fn resolve(&self, key: &str) -> Result<Attribute> {
        let (dataset_id, _) = split_key(key)?;
        if dataset_id != self.dataset_id {
            return Err(Error::validation(format!(
                "Cannot query more than one dataset: {} and {}",
                self.dataset_id, dataset_id
            )));
        }
        resolve(key, KindContext::Kind(self.kind))
    }
}
