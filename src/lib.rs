//! saleslens - search, filter, sort, paginate and summarize retail sales
//! transactions held in memory.
//!
//! Pipeline: `Query` → validate → predicate → filter → (sort → paginate | aggregate).

pub mod api;
pub mod cli;
pub mod dataset;
pub mod executor;
pub mod http_server;
pub mod observability;
pub mod query;
