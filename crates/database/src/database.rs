//! Database - Main entry point for Insight dataset operations.
//!
//! This module provides the `Database` struct which is the primary interface
//! for loading, removing and listing datasets and for running queries.

use crate::cache::DatasetCache;
use crate::config::DatabaseConfig;
use crate::convert::json_array_to_rows;
use insight_core::schema::DatasetKind;
use insight_core::{Dataset, Error, Result};
use insight_json::JsonValue;
use insight_query::{execute_query, QueryContext};
use log::{debug, info, warn};

/// Summary of one loaded dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetInfo {
    pub id: String,
    pub kind: DatasetKind,
    pub num_rows: usize,
}

impl From<&Dataset> for DatasetInfo {
    fn from(dataset: &Dataset) -> Self {
        Self {
            id: dataset.id().to_string(),
            kind: dataset.kind(),
            num_rows: dataset.len(),
        }
    }
}

/// The main database interface.
///
/// Provides methods for:
/// - Adding and removing datasets
/// - Listing loaded datasets
/// - Running queries against them
#[derive(Debug, Default)]
pub struct Database {
    config: DatabaseConfig,
    cache: DatasetCache,
}

impl Database {
    /// Creates a new, empty database.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Adds a dataset and returns the ids of all loaded datasets.
    ///
    /// The dataset must hold at least one row and every row must conform to
    /// its kind.
    pub fn add_dataset(&mut self, dataset: Dataset) -> Result<Vec<String>> {
        Dataset::check_id(dataset.id())?;
        if self.cache.contains(dataset.id()) {
            return Err(Error::invalid_dataset(format!(
                "Dataset already exists: {}",
                dataset.id()
            )));
        }
        if dataset.is_empty() {
            return Err(Error::invalid_dataset(format!(
                "Dataset {} has no valid rows",
                dataset.id()
            )));
        }
        if let Some(pos) = dataset
            .rows()
            .iter()
            .position(|row| !row.conforms_to(dataset.kind()))
        {
            return Err(Error::invalid_dataset(format!(
                "Row {} of {} does not match the {} schema",
                pos,
                dataset.id(),
                dataset.kind()
            )));
        }

        info!(
            "added dataset {} ({}, {} rows)",
            dataset.id(),
            dataset.kind(),
            dataset.len()
        );
        self.cache.insert(dataset)?;
        Ok(self.cache.ids())
    }

    /// Adds a dataset from an array of objects keyed by field name.
    ///
    /// Objects missing a field, or holding a field of the wrong type, are
    /// skipped. At least one object must be valid.
    pub fn add_dataset_from_json(
        &mut self,
        id: &str,
        kind: DatasetKind,
        rows: &JsonValue,
    ) -> Result<Vec<String>> {
        Dataset::check_id(id)?;
        if self.cache.contains(id) {
            return Err(Error::invalid_dataset(format!(
                "Dataset already exists: {}",
                id
            )));
        }
        let (rows, skipped) = json_array_to_rows(rows, kind)?;
        if skipped > 0 {
            warn!("skipped {} invalid {} entries in {}", skipped, kind, id);
        }
        self.add_dataset(Dataset::new(id, kind, rows)?)
    }

    /// Removes a dataset and returns its id.
    pub fn remove_dataset(&mut self, id: &str) -> Result<String> {
        Dataset::check_id(id)?;
        let removed = self.cache.remove(id)?;
        info!("removed dataset {}", removed.id());
        Ok(removed.id().to_string())
    }

    /// Lists the loaded datasets, sorted by id.
    pub fn list_datasets(&self) -> Vec<DatasetInfo> {
        self.cache.iter().map(DatasetInfo::from).collect()
    }

    /// Gets a loaded dataset.
    pub fn dataset(&self, id: &str) -> Option<&Dataset> {
        self.cache.get(id)
    }

    /// Builds a query context over every loaded dataset.
    pub fn query_context(&self) -> QueryContext<'_> {
        QueryContext::from_datasets(self.cache.iter())
            .with_max_results(self.config.max_result_rows)
    }

    /// Runs a query and returns its rows as value-tree objects.
    pub fn perform_query(&self, query: &JsonValue) -> Result<Vec<JsonValue>> {
        let ctx = self.query_context();
        let rows = execute_query(&ctx, query)?;
        debug!("query returned {} row(s)", rows.len());
        Ok(rows.into_iter().map(JsonValue::from).collect())
    }
}
