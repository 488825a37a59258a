//! Concurrently guarded collection of active bodies.

use std::sync::Mutex;

use crate::body::SoftBody;
use crate::sync::lock;

/// The set of bodies the driver ticks.
///
/// A single mutex guards the collection: external add/clear and the
/// driver's sweep both hold it, so a sweep never observes the registry
/// changing underneath it, and a `clear` issued mid-sweep returns only
/// after the sweep (and every copy task it spawned) has finished with the
/// removed bodies.
#[derive(Default)]
pub struct BodyRegistry {
    bodies: Mutex<Vec<SoftBody>>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, body: SoftBody) {
        lock(&self.bodies).push(body);
    }

    /// Remove every body from the simulation.
    pub fn clear(&self) {
        lock(&self.bodies).clear();
    }

    pub fn get(&self, index: usize) -> Option<SoftBody> {
        lock(&self.bodies).get(index).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.bodies).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.bodies).is_empty()
    }

    /// Run `f` over the current bodies with the registry locked for the
    /// whole call. The driver uses this for its tick sweep.
    pub(crate) fn with_bodies<R>(&self, f: impl FnOnce(&[SoftBody]) -> R) -> R {
        let bodies = lock(&self.bodies);
        f(&bodies)
    }
}
