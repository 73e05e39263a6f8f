//! Sales dataset
//!
//! Holds the immutable, in-memory collection of sales transactions that
//! every query runs against, and the loader that builds it from disk.

mod errors;
mod loader;
mod record;
mod snapshot;

pub use errors::{DatasetError, DatasetResult};
pub use loader::{parse_date, DatasetLoader, LoadReport, MAX_AGE};
pub use record::Record;
pub use snapshot::{Dataset, RecordId};
