//! Point masses in the soft-body graph.

use glam::Vec3;

/// A point mass: position, velocity, accumulated force, and adjacency.
///
/// `connections` holds indices into the owning body's connection collection
/// for every spring attached to this node. It is filled at construction and
/// never changes afterwards.
#[derive(Clone, Debug)]
pub struct Node {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Net force accumulated by the last force evaluation.
    pub force: Vec3,
    pub mass: f32,
    /// When set, the integrator pins position and holds velocity at zero.
    /// The node still participates in force evaluation for its neighbors.
    pub locked: bool,
    pub connections: Vec<usize>,
}

impl Node {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Node {
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            locked: false,
            connections: Vec::new(),
        }
    }

    /// True if mass, position, and velocity are all finite.
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.position.is_finite() && self.velocity.is_finite()
    }
}
