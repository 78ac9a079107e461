//! Query executor module.

mod aggregate;
mod filter;
mod limit;
mod project;
mod result;
mod sort;

pub use aggregate::{reduce, AggregateExecutor};
pub use filter::FilterExecutor;
pub use limit::LimitExecutor;
pub use project::ProjectExecutor;
pub use result::{value_to_json, ResultRow};
pub use sort::SortExecutor;
