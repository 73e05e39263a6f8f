//! Observability subsystem
//!
//! Provides:
//! - Structured logging through `tracing` (pretty or JSON)
//! - Typed lifecycle and query events
//! - Monotonic operational counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. Counters never decrease
//!
//! # Usage
//!
//! ```ignore
//! use saleslens::observability::{init_logging, log_event, Event, LogFormat, MetricsRegistry};
//!
//! init_logging("info", LogFormat::Pretty);
//! log_event(Event::BootStart);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_queries_executed();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{env_filter, init_logging, LogFormat};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
///
/// Fatal events are logged at ERROR level, everything else at INFO.
pub fn log_event(event: Event) {
    if event.is_fatal() {
        tracing::error!(event = %event);
    } else {
        tracing::info!(event = %event);
    }
}
