//! Simulation configuration.

use std::time::Duration;

use glam::Vec3;

/// Default gravitational acceleration, straight down the y axis.
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Configuration for the simulation driver.
///
/// # Builder Pattern
/// ```
/// use pliant::{SimConfig, Vec3};
///
/// let config = SimConfig::new()
///     .with_gravity(Vec3::new(0.0, -1.62, 0.0))
///     .with_time_step(1e-3);
/// ```
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Constant body acceleration applied to every node. Default: `(0, -9.8, 0)`.
    pub gravity: Vec3,
    /// Integration step in seconds. Default: `1e-4`.
    pub time_step: f64,
    /// How long the simulation thread sleeps between checks while paused.
    /// Default: 7 ms.
    pub pause_poll: Duration,
    /// Number of recent ticks the rolling tick-time average covers.
    /// Default: 30.
    pub stats_window: usize,
}

impl SimConfig {
    pub fn new() -> Self {
        SimConfig {
            gravity: DEFAULT_GRAVITY,
            time_step: 1e-4,
            pause_poll: Duration::from_millis(7),
            stats_window: 30,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_pause_poll(mut self, pause_poll: Duration) -> Self {
        self.pause_poll = pause_poll;
        self
    }

    pub fn with_stats_window(mut self, stats_window: usize) -> Self {
        self.stats_window = stats_window.max(1);
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
