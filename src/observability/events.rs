//! Observability events
//!
//! Every lifecycle and query event the service logs has a fixed, typed
//! name. Events are emitted through `tracing` with the name in the `event`
//! field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, ready to serve
    BootComplete,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,

    // Configuration & data
    /// Configuration loaded
    ConfigLoaded,
    /// Dataset loaded into memory
    DatasetLoaded,
    /// Dataset could not be loaded (FATAL)
    DatasetLoadFailed,

    // Query operations
    /// Query received
    QueryReceived,
    /// Query executed successfully
    QueryExecuted,
    /// Query rejected by validation
    QueryRejected,
    /// Summary computed
    SummaryComplete,
    /// Filter options listed
    FilterOptionsServed,

    // Server operations
    /// Server serving (ready for requests)
    Serving,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SALESLENS_STARTUP_BEGIN",
            Event::BootComplete => "SALESLENS_STARTUP_COMPLETE",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::DatasetLoadFailed => "DATASET_LOAD_FAILED",

            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::SummaryComplete => "SUMMARY_COMPLETE",
            Event::FilterOptionsServed => "FILTER_OPTIONS_SERVED",

            Event::Serving => "SALESLENS_SERVING",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::DatasetLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_upper_snake_case() {
        let events = [
            Event::BootStart,
            Event::BootComplete,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::ConfigLoaded,
            Event::DatasetLoaded,
            Event::DatasetLoadFailed,
            Event::QueryReceived,
            Event::QueryExecuted,
            Event::QueryRejected,
            Event::SummaryComplete,
            Event::FilterOptionsServed,
            Event::Serving,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::DatasetLoadFailed.is_fatal());
        assert!(!Event::QueryRejected.is_fatal());
    }
}
