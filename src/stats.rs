//! Rolling tick-duration statistics.

use std::collections::VecDeque;
use std::time::Duration;

/// Wall-clock durations of the most recent ticks, averaged over a fixed
/// window.
#[derive(Debug)]
pub struct TickStats {
    window: VecDeque<Duration>,
    capacity: usize,
    total_ticks: u64,
}

impl TickStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        TickStats {
            window: VecDeque::with_capacity(capacity),
            capacity,
            total_ticks: 0,
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(elapsed);
        self.total_ticks += 1;
    }

    /// Mean duration over the window; zero before the first tick.
    pub fn rolling_mean(&self) -> Duration {
        if self.window.is_empty() {
            return Duration::ZERO;
        }
        let sum: Duration = self.window.iter().sum();
        sum / self.window.len() as u32
    }

    /// Ticks recorded since creation, including those evicted from the
    /// window.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}
