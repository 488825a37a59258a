//! The simulation driver: a dedicated thread that ticks every registered
//! body, publishes snapshots, and tracks tick-time statistics.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::debug;

use crate::config::SimConfig;
use crate::registry::BodyRegistry;
use crate::stats::TickStats;
use crate::sync::{lock, AtomicF64};

/// Sentinel for the step counter: tick continuously until paused.
const RUN: i32 = -1;

/// Observable driver state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No simulation thread is running.
    Stopped,
    /// Ticking continuously at the configured time step.
    Running,
    /// Thread alive, not advancing.
    Paused,
    /// A bounded number of ticks remain before returning to Paused.
    SingleStep,
}

struct Shared {
    registry: BodyRegistry,
    config: SimConfig,
    stop: AtomicBool,
    /// `RUN` = run continuously, 0 = paused, n > 0 = n single steps left.
    steps: AtomicI32,
    time_step: AtomicF64,
    elapsed: AtomicF64,
    stats: Mutex<TickStats>,
}

/// Owns the simulation thread and the registry of bodies it ticks.
///
/// The driver starts in the Stopped state with the step counter paused;
/// call [`start`](PhysicsDriver::start) to spawn the thread and
/// [`run`](PhysicsDriver::run) to begin ticking.
pub struct PhysicsDriver {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl PhysicsDriver {
    pub fn new(config: SimConfig) -> Self {
        let shared = Shared {
            registry: BodyRegistry::new(),
            stop: AtomicBool::new(false),
            steps: AtomicI32::new(0),
            time_step: AtomicF64::new(config.time_step),
            elapsed: AtomicF64::new(0.0),
            stats: Mutex::new(TickStats::new(config.stats_window)),
            config,
        };
        PhysicsDriver { shared: Arc::new(shared), thread: None }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.shared.registry
    }

    /// Spawn the simulation thread. Idempotent while the thread is alive.
    pub fn start(&mut self) {
        if self.thread.is_some() {
            return;
        }
        self.shared.stop.store(false, Ordering::Relaxed);
        let shared = Arc::clone(&self.shared);
        self.thread = Some(thread::spawn(move || simulate(&shared)));
        debug!("simulation thread started");
    }

    /// Signal the thread to stop and join it.
    pub fn stop(&mut self) {
        self.shared.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
            debug!("simulation thread stopped");
        }
    }

    /// Tick continuously until paused or stopped.
    pub fn run(&self) {
        self.shared.steps.store(RUN, Ordering::Relaxed);
    }

    /// Stop advancing; the thread stays alive and polls for changes.
    pub fn pause(&self) {
        self.shared.steps.store(0, Ordering::Relaxed);
    }

    /// Advance exactly `count` ticks, then return to Paused.
    pub fn step(&self, count: u32) {
        let count = count.min(i32::MAX as u32) as i32;
        self.shared.steps.store(count, Ordering::Relaxed);
    }

    pub fn state(&self) -> DriverState {
        if self.thread.is_none() {
            return DriverState::Stopped;
        }
        match self.shared.steps.load(Ordering::Relaxed) {
            0 => DriverState::Paused,
            n if n > 0 => DriverState::SingleStep,
            _ => DriverState::Running,
        }
    }

    /// Integration step in seconds, applied from the next tick onward.
    pub fn set_time_step(&self, time_step: f64) {
        self.shared.time_step.store(time_step);
    }

    pub fn time_step(&self) -> f64 {
        self.shared.time_step.load()
    }

    /// Total simulated time accumulated across all ticks, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.shared.elapsed.load()
    }

    /// Rolling mean wall-clock duration of recent ticks.
    pub fn average_tick_time(&self) -> std::time::Duration {
        lock(&self.shared.stats).rolling_mean()
    }

    pub fn tick_count(&self) -> u64 {
        lock(&self.shared.stats).total_ticks()
    }
}

impl Drop for PhysicsDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn simulate(shared: &Shared) {
    loop {
        if shared.stop.load(Ordering::Relaxed) {
            return;
        }

        let pace = shared.steps.load(Ordering::Relaxed);
        if pace == 0 {
            thread::sleep(shared.config.pause_poll);
            continue;
        }
        if pace > 0 {
            shared.steps.fetch_sub(1, Ordering::Relaxed);
        }

        let h = shared.time_step.load();
        let gravity = shared.config.gravity;
        let started = Instant::now();

        // The registry stays locked for the whole sweep; every body gets
        // its full step and publish before external mutation can land.
        shared.registry.with_bodies(|bodies| {
            for body in bodies {
                body.tick(h as f32, gravity);
                body.publish();
            }
            for body in bodies {
                body.join_copy();
            }
        });

        shared.elapsed.store(shared.elapsed.load() + h);
        lock(&shared.stats).record(started.elapsed());
    }
}
