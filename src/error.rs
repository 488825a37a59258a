//! Error types for body construction.

use thiserror::Error;

/// Errors rejected at body construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A connection pair references a node index outside the node collection.
    #[error("connection {index} references node {node} out of range (node count: {count})")]
    NodeOutOfRange { index: usize, node: usize, count: usize },
    /// A connection pair joins a node to itself.
    #[error("connection {index} joins node {node} to itself")]
    SelfConnection { index: usize, node: usize },
    /// Node mass must be positive and finite.
    #[error("node mass must be positive and finite, got {mass}")]
    InvalidMass { mass: f32 },
}
