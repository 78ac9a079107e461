//! Execution context for query execution.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use insight_core::schema::DatasetKind;
use insight_core::Dataset;

/// Largest result a query may return unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 5000;

/// Map from loaded dataset id to its kind.
pub type KindMap = HashMap<String, DatasetKind>;

/// An immutable snapshot of the datasets a query may read.
///
/// The context borrows its datasets, so no dataset can change while a query
/// built on it runs.
#[derive(Clone, Debug)]
pub struct QueryContext<'a> {
    datasets: HashMap<String, &'a Dataset>,
    kinds: KindMap,
    max_results: usize,
}

impl<'a> QueryContext<'a> {
    /// Creates a new empty context.
    pub fn new() -> Self {
        Self {
            datasets: HashMap::new(),
            kinds: KindMap::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Creates a context over the given datasets.
    pub fn from_datasets(datasets: impl IntoIterator<Item = &'a Dataset>) -> Self {
        let mut ctx = Self::new();
        for dataset in datasets {
            ctx.register(dataset);
        }
        ctx
    }

    /// Sets the cardinality cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Registers a dataset, replacing any dataset with the same id.
    pub fn register(&mut self, dataset: &'a Dataset) {
        self.kinds.insert(dataset.id().into(), dataset.kind());
        self.datasets.insert(dataset.id().into(), dataset);
    }

    /// Gets a dataset by id.
    pub fn dataset(&self, id: &str) -> Option<&'a Dataset> {
        self.datasets.get(id).copied()
    }

    /// Returns the id to kind map of every registered dataset.
    #[inline]
    pub fn kinds(&self) -> &KindMap {
        &self.kinds
    }

    /// Returns the cardinality cap.
    #[inline]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Returns the registered dataset ids, sorted.
    pub fn dataset_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.datasets.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for QueryContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_context_register() {
        let rooms = Dataset::new("rooms", DatasetKind::Rooms, vec![]).unwrap();
        let courses = Dataset::new("courses", DatasetKind::Sections, vec![]).unwrap();
        let ctx = QueryContext::from_datasets([&rooms, &courses]);

        assert_eq!(ctx.dataset("rooms").map(|d| d.kind()), Some(DatasetKind::Rooms));
        assert_eq!(ctx.kinds().get("courses"), Some(&DatasetKind::Sections));
        assert!(ctx.dataset("sections").is_none());
        assert_eq!(ctx.dataset_ids(), vec!["courses", "rooms"]);
    }

    #[test]
    fn test_context_max_results() {
        let ctx = QueryContext::new();
        assert_eq!(ctx.max_results(), DEFAULT_MAX_RESULTS);
        let ctx = ctx.with_max_results(10);
        assert_eq!(ctx.max_results(), 10);
    }
}
