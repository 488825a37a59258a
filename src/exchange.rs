//! Double-buffer exchange between the work and draw representations.
//!
//! Both directions copy on a dedicated task so the simulation loop's own
//! tick never performs the copy inline; at most one task per body is in
//! flight, and the driver joins every task at the end of each sweep.
//!
//! Lock order is always work before draw. Holding the work lock for the
//! duration of a publish is what guarantees that tick N's snapshot is
//! complete before tick N+1 can touch the work state.

use std::sync::Arc;
use std::thread;

use tracing::warn;

use crate::body::{BodyInner, SoftBody, SoftRep};
use crate::sync::lock;

/// True when the two representations have the same shape. A mismatch means
/// the body was structurally mutated outside the supported lifecycle; the
/// requested copy is skipped rather than guessed at.
fn same_shape(a: &SoftRep, b: &SoftRep) -> bool {
    a.nodes.len() == b.nodes.len() && a.connections.len() == b.connections.len()
}

impl SoftBody {
    /// Refresh the draw representation from the work representation.
    ///
    /// Joins the previous copy task for this body, then starts the new one.
    /// Readers are only ever blocked for the duration of the draw-side
    /// copy, never for a whole tick.
    pub fn publish(&self) {
        // The slot lock is held across join + spawn so two publishers can
        // never race each other into the slot.
        let mut slot = lock(&self.inner.copy_task);
        if let Some(task) = slot.take() {
            let _ = task.join();
        }
        let inner = Arc::clone(&self.inner);
        *slot = Some(thread::spawn(move || copy_over(&inner)));
    }

    /// Push UI-staged edits from the draw representation back into the work
    /// representation: lock flags and masses only. Position, velocity, and
    /// force are derived exclusively by the integrator and never copied
    /// back.
    pub fn write_back(&self) {
        let mut slot = lock(&self.inner.copy_task);
        if let Some(task) = slot.take() {
            let _ = task.join();
        }
        let inner = Arc::clone(&self.inner);
        *slot = Some(thread::spawn(move || copy_back(&inner)));
    }

    /// Wait for this body's in-flight copy task, if any.
    pub fn join_copy(&self) {
        let task = lock(&self.inner.copy_task).take();
        if let Some(task) = task {
            let _ = task.join();
        }
    }
}

fn copy_over(inner: &BodyInner) {
    let work = lock(&inner.work);
    let mut draw = lock(&inner.draw);
    if !same_shape(&work, &draw) {
        warn!(
            work_nodes = work.nodes.len(),
            draw_nodes = draw.nodes.len(),
            "skipping snapshot publish: representation sizes differ"
        );
        return;
    }
    draw.nodes.clone_from(&work.nodes);
    draw.connections.clone_from(&work.connections);
}

fn copy_back(inner: &BodyInner) {
    let mut work = lock(&inner.work);
    let draw = lock(&inner.draw);
    if !same_shape(&work, &draw) {
        warn!(
            work_nodes = work.nodes.len(),
            draw_nodes = draw.nodes.len(),
            "skipping write-back: representation sizes differ"
        );
        return;
    }
    for (target, source) in work.nodes.iter_mut().zip(draw.nodes.iter()) {
        target.locked = source.locked;
        target.mass = source.mass;
    }
}
