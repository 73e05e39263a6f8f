//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of operational counters
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Records held by the loaded dataset
    records_loaded: AtomicU64,
    /// Successful transaction queries
    queries_executed: AtomicU64,
    /// Queries rejected by validation
    queries_rejected: AtomicU64,
    /// Rows returned across all pages
    rows_returned: AtomicU64,
    /// Summaries computed
    summaries_computed: AtomicU64,
    /// Filter option lookups
    filter_option_requests: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of the loaded dataset
    pub fn set_records_loaded(&self, count: u64) {
        self.records_loaded.store(count, Ordering::Relaxed);
    }

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Add rows returned by a page
    pub fn add_rows_returned(&self, rows: u64) {
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    /// Increment summaries computed
    pub fn increment_summaries(&self) {
        self.summaries_computed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment filter option lookups
    pub fn increment_filter_option_requests(&self) {
        self.filter_option_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_loaded: self.records_loaded.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            summaries_computed: self.summaries_computed.load(Ordering::Relaxed),
            filter_option_requests: self.filter_option_requests.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_loaded: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub rows_returned: u64,
    pub summaries_computed: u64,
    pub filter_option_requests: u64,
}
