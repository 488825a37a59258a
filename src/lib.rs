//! Threaded mass-spring soft-body simulation.
//!
//! `pliant` simulates deformable bodies as node/spring networks advanced by
//! a 4th-order Runge-Kutta integrator on a dedicated simulation thread,
//! while renderers and UI read a consistent double-buffered snapshot.
//!
//! # Features
//!
//! - **Mass-spring graphs**: nodes with mass and lock flags, connections
//!   with construction-time rest lengths, validated index-based topology
//! - **RK4 integration**: four force evaluations per tick, with drag,
//!   gravity, and a pluggable spring force law (default Hookean)
//! - **Double buffering**: a work copy owned by the simulation thread and
//!   a draw copy for readers, reconciled by per-body copy tasks; UI edits
//!   (lock flags, masses) flow back through the inverse path
//! - **Driver state machine**: run / pause / single-step controls over a
//!   registry of bodies, with rolling tick-time statistics
//! - **Parallel force accumulation** (`parallel` feature, default on):
//!   chunked, race-free, deterministic spring-force evaluation via rayon

pub mod body;
pub mod config;
pub mod driver;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod node;
pub mod registry;
pub mod shapes;
pub mod spring;
pub mod stats;

mod exchange;
mod sync;

// Re-export primary API
pub use body::{EnergyBreakdown, SoftBody, SoftRep, DEFAULT_DRAG, DEFAULT_STIFFNESS};
pub use config::{SimConfig, DEFAULT_GRAVITY};
pub use driver::{DriverState, PhysicsDriver};
pub use error::BuildError;
pub use forces::ForceParams;
pub use node::Node;
pub use registry::BodyRegistry;
pub use shapes::{cube, pendulum, sheet, CubeConfig, PendulumConfig, SheetConfig};
pub use spring::{Connection, Hookean, SpringForce};
pub use stats::TickStats;

pub use glam::Vec3;
