//! Query executor
//!
//! Consumes planned queries and produces deterministic results over an
//! immutable dataset snapshot.
//!
//! # Execution Flow (strict order)
//!
//! 1. Validate the query and build its predicate
//! 2. Filter records, preserving dataset order
//! 3. Aggregate the filtered records
//! 4. Stable sort by the requested key
//! 5. Slice the requested page
//!
//! # Invariants
//!
//! - Same query + same dataset = same result
//! - Summary counts equal the page's total match count
//! - The dataset is never mutated

mod aggregator;
mod executor;
mod filters;
mod options;
mod paginator;
mod result;
mod sorter;

pub use aggregator::Aggregator;
pub use executor::QueryExecutor;
pub use filters::FilterEvaluator;
pub use options::FilterOptions;
pub use paginator::Paginator;
pub use result::{PageResult, QueryOutcome, SummaryResult};
pub use sorter::ResultSorter;
