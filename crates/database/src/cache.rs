//! Dataset storage.
//!
//! This module provides the `DatasetCache` struct which holds every loaded
//! dataset by id.

use insight_core::{Dataset, Error, Result};
use std::collections::BTreeMap;

/// Cache for managing loaded datasets.
#[derive(Debug, Default)]
pub struct DatasetCache {
    /// Dataset id → dataset mapping.
    datasets: BTreeMap<String, Dataset>,
}

impl DatasetCache {
    /// Creates a new empty dataset cache.
    pub fn new() -> Self {
        Self {
            datasets: BTreeMap::new(),
        }
    }

    /// Adds a dataset to the cache.
    pub fn insert(&mut self, dataset: Dataset) -> Result<()> {
        if self.datasets.contains_key(dataset.id()) {
            return Err(Error::invalid_dataset(format!(
                "Dataset already exists: {}",
                dataset.id()
            )));
        }
        self.datasets.insert(dataset.id().to_string(), dataset);
        Ok(())
    }

    /// Removes a dataset from the cache.
    pub fn remove(&mut self, id: &str) -> Result<Dataset> {
        self.datasets.remove(id).ok_or_else(|| Error::not_found(id))
    }

    /// Gets a dataset by id.
    pub fn get(&self, id: &str) -> Option<&Dataset> {
        self.datasets.get(id)
    }

    /// Checks if a dataset exists.
    pub fn contains(&self, id: &str) -> bool {
        self.datasets.contains_key(id)
    }

    /// Returns the number of datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Returns all dataset ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }

    /// Iterates over the datasets, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    /// Returns the total row count across all datasets.
    pub fn total_row_count(&self) -> usize {
        self.datasets.values().map(Dataset::len).sum()
    }
}
