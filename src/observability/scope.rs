//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` with elapsed time on `complete()`
//! - Logs `{name}_FAILED` on `fail()`
//! - Logs `{name}_INCOMPLETE` if dropped without either

use std::time::Instant;

use tracing::{error, info, warn};

/// A scope that logs the begin and end of a long operation
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::new("DATASET_LOAD");
/// // ... do work ...
/// scope.complete(); // logs DATASET_LOAD_COMPLETE
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    timer: Timer,
    completed: bool,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    ///
    /// Logs `{name}_BEGIN` immediately.
    pub fn new(name: &'a str) -> Self {
        info!(event = %format!("{}_BEGIN", name));
        Self {
            name,
            timer: Timer::new(),
            completed: false,
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(mut self) {
        self.completed = true;
        info!(
            event = %format!("{}_COMPLETE", self.name),
            elapsed_ms = self.timer.elapsed_ms()
        );
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        error!(
            event = %format!("{}_FAILED", self.name),
            elapsed_ms = self.timer.elapsed_ms(),
            reason
        );
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            warn!(
                event = %format!("{}_INCOMPLETE", self.name),
                reason = "scope dropped without completion"
            );
        }
    }
}

/// A simple duration timer for logging elapsed time
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed whole milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_complete() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_completed());
        scope.complete();
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        // Logs a warning, does not panic
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::new();
        let first = timer.elapsed_ms();
        assert!(timer.elapsed_ms() >= first);
    }
}
