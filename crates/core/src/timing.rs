//! Elapsed-time measurement for benchmarking vector code.
//!
//! [`Stopwatch`] is the reset/read timer the benchmark harness drives;
//! [`ProfilerScope`] is an RAII wrapper that reports its lifetime through
//! `tracing` when dropped.
use std::time::Instant;

use tracing::debug;

/// Millisecond stopwatch on the monotonic clock.
///
/// `read` never decreases between two `reset` calls. Values below the
/// platform timer resolution carry no meaning.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch that starts counting immediately.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Makes the current instant the zero reference.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    /// Milliseconds since construction or the last `reset`.
    pub fn read(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// A profiling scope that measures elapsed time using RAII.
///
/// The elapsed time is logged at `debug` level when the scope is dropped.
pub struct ProfilerScope {
    stopwatch: Stopwatch,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            name,
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.stopwatch.read()
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        debug!(
            scope = self.name,
            elapsed_ms = self.elapsed_ms(),
            "profiler scope finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_profiler_scope_measures_time() {
        let scope = ProfilerScope::new("test");
        thread::sleep(Duration::from_millis(10));
        let elapsed = scope.elapsed_ms();
        assert!(elapsed >= 10.0, "Expected at least 10ms, got {elapsed}");
    }

    #[test]
    fn test_stopwatch_is_monotonic() {
        let watch = Stopwatch::new();
        let mut last = watch.read();
        assert!(last >= 0.0);
        for _ in 0..1000 {
            let now = watch.read();
            assert!(now >= last, "{now} < {last}");
            last = now;
        }
    }

    #[test]
    fn test_stopwatch_reset_restarts_from_zero() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(20));
        let before = watch.read();
        watch.reset();
        let after = watch.read();
        assert!(before >= 20.0, "Expected at least 20ms, got {before}");
        assert!(after < before, "reset did not restart: {after} >= {before}");
    }
}
