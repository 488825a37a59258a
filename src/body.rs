//! Soft bodies: construction, the work/draw representation pair, and the
//! draw-side read and edit API.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use glam::Vec3;

use crate::error::BuildError;
use crate::forces::ForceParams;
use crate::integrator;
use crate::node::Node;
use crate::spring::{Connection, Hookean, SpringForce};
use crate::sync::{lock, AtomicF32};

/// Default linear drag coefficient.
pub const DEFAULT_DRAG: f32 = 0.1;
/// Default Hookean spring constant.
pub const DEFAULT_STIFFNESS: f32 = 98.0;

/// One complete representation of a body's state: the unit of snapshot
/// copying between the work and draw sides.
#[derive(Clone, Debug, Default)]
pub struct SoftRep {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

/// Energy breakdown computed from a draw snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnergyBreakdown {
    pub kinetic: f32,
    pub spring: f32,
    pub gravitational: f32,
}

impl EnergyBreakdown {
    pub fn total(&self) -> f32 {
        self.kinetic + self.spring + self.gravitational
    }
}

pub(crate) struct BodyInner {
    /// Authoritative state, mutated only by the simulation thread.
    pub(crate) work: Mutex<SoftRep>,
    /// Periodically refreshed snapshot for readers, plus the staging area
    /// for UI edits awaiting write-back.
    pub(crate) draw: Mutex<SoftRep>,
    pub(crate) drag: AtomicF32,
    pub(crate) stiffness: AtomicF32,
    pub(crate) force_law: Box<dyn SpringForce>,
    pub(crate) copy_task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for BodyInner {
    fn drop(&mut self) {
        // No copy task may outlive its body.
        if let Some(task) = lock(&self.copy_task).take() {
            let _ = task.join();
        }
    }
}

/// A mass-spring soft body. Cheap to clone; clones share state.
///
/// The simulation thread owns the work representation and mutates it every
/// tick; readers and the UI see only the draw representation, reconciled
/// through [`publish`](SoftBody::publish) and
/// [`write_back`](SoftBody::write_back).
#[derive(Clone)]
pub struct SoftBody {
    pub(crate) inner: Arc<BodyInner>,
}

impl std::fmt::Debug for SoftBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftBody").finish_non_exhaustive()
    }
}

impl SoftBody {
    /// Build a body from node positions, connection index pairs, and a
    /// uniform per-node mass, using the default Hookean force law.
    ///
    /// Every pair must reference two distinct, in-range nodes. Rest lengths
    /// are fixed here from the initial positions; the structure cannot be
    /// changed afterwards.
    pub fn create(
        positions: &[Vec3],
        pairs: &[(usize, usize)],
        node_mass: f32,
    ) -> Result<SoftBody, BuildError> {
        Self::create_with_law(positions, pairs, node_mass, Box::new(Hookean))
    }

    /// [`create`](SoftBody::create) with a custom spring force law.
    pub fn create_with_law(
        positions: &[Vec3],
        pairs: &[(usize, usize)],
        node_mass: f32,
        force_law: Box<dyn SpringForce>,
    ) -> Result<SoftBody, BuildError> {
        if !(node_mass.is_finite() && node_mass > 0.0) {
            return Err(BuildError::InvalidMass { mass: node_mass });
        }

        let mut nodes: Vec<Node> = positions
            .iter()
            .map(|&position| Node::new(position, node_mass))
            .collect();

        let mut connections = Vec::with_capacity(pairs.len());
        for (index, &(node1, node2)) in pairs.iter().enumerate() {
            for node in [node1, node2] {
                if node >= nodes.len() {
                    return Err(BuildError::NodeOutOfRange { index, node, count: nodes.len() });
                }
            }
            if node1 == node2 {
                return Err(BuildError::SelfConnection { index, node: node1 });
            }
            let rest_length = nodes[node1].position.distance(nodes[node2].position);
            connections.push(Connection { node1, node2, rest_length });
            nodes[node1].connections.push(index);
            nodes[node2].connections.push(index);
        }

        let work = SoftRep { nodes, connections };
        let draw = work.clone();

        Ok(SoftBody {
            inner: Arc::new(BodyInner {
                work: Mutex::new(work),
                draw: Mutex::new(draw),
                drag: AtomicF32::new(DEFAULT_DRAG),
                stiffness: AtomicF32::new(DEFAULT_STIFFNESS),
                force_law,
                copy_task: Mutex::new(None),
            }),
        })
    }

    /// Advance the work representation by one RK4 step.
    ///
    /// The driver calls this once per body per tick; it is public so a
    /// body can also be stepped directly without a simulation thread.
    /// Readers do not see the result until the next
    /// [`publish`](SoftBody::publish).
    pub fn tick(&self, h: f32, gravity: Vec3) {
        let params = ForceParams {
            drag: self.inner.drag.load(),
            stiffness: self.inner.stiffness.load(),
            gravity,
        };
        let mut work = lock(&self.inner.work);
        let SoftRep { nodes, connections } = &mut *work;
        integrator::rk4_step(nodes, connections, h, &params, self.inner.force_law.as_ref());
    }

    // --- Per-body parameters -------------------------------------------

    pub fn drag(&self) -> f32 {
        self.inner.drag.load()
    }

    pub fn set_drag(&self, drag: f32) {
        self.inner.drag.store(drag);
    }

    pub fn stiffness(&self) -> f32 {
        self.inner.stiffness.load()
    }

    pub fn set_stiffness(&self, stiffness: f32) {
        self.inner.stiffness.store(stiffness);
    }

    // --- Draw-side read API --------------------------------------------

    pub fn node_count(&self) -> usize {
        lock(&self.inner.draw).nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        lock(&self.inner.draw).connections.len()
    }

    /// Snapshot of a single node, if the index is in range.
    pub fn node(&self, index: usize) -> Option<Node> {
        lock(&self.inner.draw).nodes.get(index).cloned()
    }

    /// All node positions, in index order.
    pub fn positions(&self) -> Vec<Vec3> {
        lock(&self.inner.draw).nodes.iter().map(|n| n.position).collect()
    }

    /// All node velocities, in index order.
    pub fn velocities(&self) -> Vec<Vec3> {
        lock(&self.inner.draw).nodes.iter().map(|n| n.velocity).collect()
    }

    /// Connection endpoint pairs, for line rendering.
    pub fn connection_pairs(&self) -> Vec<(usize, usize)> {
        lock(&self.inner.draw)
            .connections
            .iter()
            .map(|c| (c.node1, c.node2))
            .collect()
    }

    /// Snapshot of the full connection collection.
    pub fn connections(&self) -> Vec<Connection> {
        lock(&self.inner.draw).connections.clone()
    }

    /// Kinetic, spring-potential, and gravitational-potential energy of the
    /// current draw snapshot.
    ///
    /// The spring term assumes the Hookean law (`U = K/2 * (len - rest)^2`);
    /// the gravitational term measures height against the given gravity
    /// vector (`U = -m * g . x`).
    pub fn energies(&self, gravity: Vec3) -> EnergyBreakdown {
        let draw = lock(&self.inner.draw);
        let stiffness = self.inner.stiffness.load();

        let mut breakdown = EnergyBreakdown::default();
        for node in &draw.nodes {
            breakdown.kinetic += 0.5 * node.mass * node.velocity.length_squared();
            breakdown.gravitational -= node.mass * gravity.dot(node.position);
        }
        for connection in &draw.connections {
            let stretch = connection.length(&draw.nodes) - connection.rest_length;
            breakdown.spring += 0.5 * stiffness * stretch * stretch;
        }
        breakdown
    }

    /// Advisory diagnostic: indices of nodes whose mass, position, or
    /// velocity has gone NaN or infinite, from the draw snapshot.
    ///
    /// The integrator never checks this itself; a diverged body keeps
    /// ticking until the caller removes it.
    pub fn non_finite_nodes(&self) -> Vec<usize> {
        lock(&self.inner.draw)
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_finite())
            .map(|(index, _)| index)
            .collect()
    }

    // --- Draw-side edit API (staged until write_back) ------------------

    /// Set a node's lock flag in the draw representation. Takes effect in
    /// the simulation only after [`write_back`](SoftBody::write_back).
    /// Returns false if the index is out of range.
    pub fn set_node_locked(&self, index: usize, locked: bool) -> bool {
        let mut draw = lock(&self.inner.draw);
        match draw.nodes.get_mut(index) {
            Some(node) => {
                node.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Set a node's mass in the draw representation. Rejects non-positive
    /// or non-finite masses. Takes effect only after
    /// [`write_back`](SoftBody::write_back).
    pub fn set_node_mass(&self, index: usize, mass: f32) -> bool {
        if !(mass.is_finite() && mass > 0.0) {
            return false;
        }
        let mut draw = lock(&self.inner.draw);
        match draw.nodes.get_mut(index) {
            Some(node) => {
                node.mass = mass;
                true
            }
            None => false,
        }
    }
}
