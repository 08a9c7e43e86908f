//! Wall-Clock Timing
//!
//! Monotonic timing for candidate invocations, backed by
//! `std::time::Instant`.

use std::time::{Duration, Instant};

/// Timer for a single candidate invocation
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since `start`
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        // Should be at least 5ms
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::start();
        let first = timer.stop();
        let second = timer.stop();
        assert!(second >= first);
    }
}
