//! Looped interval timers

use serde::{Deserialize, Serialize};

/// Millisecond accumulator that fires every `interval_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl IntervalTimer {
    /// Timer that fires every `interval_ms` (at least 1 ms)
    pub fn new(interval_ms: u32) -> Self {
        Self {
            // A zero interval would fire forever
            interval_ms: f64::from(interval_ms.max(1)),
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms` and return how many times the timer fired
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            fired += 1;
        }
        fired
    }

    /// Drop any partial interval
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}
