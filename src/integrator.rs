//! 4th-order Runge-Kutta integration over node (position, velocity) state.

use glam::Vec3;

use crate::forces::{self, ForceParams};
use crate::node::Node;
use crate::spring::{Connection, SpringForce};

/// Advance every unlocked node by one step of size `h`.
///
/// The state of a node is the pair (position, velocity); its derivative is
/// (velocity, force / mass). Forces are re-evaluated at each of the four
/// stages, with stage states derived from the step-start state:
///
/// ```text
/// k1 at the start state
/// k2 at start + (h/2) k1
/// k3 at start + (h/2) k2
/// k4 at start +  h    k3
/// final = start + (h/6)(k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// Locked nodes keep their step-start position and a zero velocity through
/// every stage; their positions still feed the force evaluation, so they
/// act on unlocked neighbors as fixed anchors.
///
/// No clamping is applied: an unstable stiffness/step combination diverges
/// and is expected to be caught by the caller's diagnostics, not here.
pub fn rk4_step(
    nodes: &mut [Node],
    connections: &[Connection],
    h: f32,
    params: &ForceParams,
    law: &dyn SpringForce,
) {
    if nodes.is_empty() {
        return;
    }

    for node in nodes.iter_mut() {
        if node.locked {
            node.velocity = Vec3::ZERO;
        }
    }

    let start: Vec<(Vec3, Vec3)> = nodes.iter().map(|n| (n.position, n.velocity)).collect();
    let mut velocity_sum = vec![Vec3::ZERO; nodes.len()];
    let mut accel_sum = vec![Vec3::ZERO; nodes.len()];

    // (weight of this stage's slope, step fraction at which the next stage
    // is evaluated)
    const STAGES: [(f32, f32); 4] = [(1.0, 0.5), (2.0, 0.5), (2.0, 1.0), (1.0, 0.0)];

    for (stage, &(weight, next_at)) in STAGES.iter().enumerate() {
        forces::accumulate(nodes, connections, params, law);

        for (i, node) in nodes.iter_mut().enumerate() {
            if node.locked {
                continue;
            }
            let velocity = node.velocity;
            let accel = node.force / node.mass;
            velocity_sum[i] += weight * velocity;
            accel_sum[i] += weight * accel;

            if stage < 3 {
                let (p0, v0) = start[i];
                node.position = p0 + next_at * h * velocity;
                node.velocity = v0 + next_at * h * accel;
            }
        }
    }

    for (i, node) in nodes.iter_mut().enumerate() {
        if node.locked {
            continue;
        }
        let (p0, v0) = start[i];
        node.position = p0 + (h / 6.0) * velocity_sum[i];
        node.velocity = v0 + (h / 6.0) * accel_sum[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::Hookean;

    /// One free-falling node: RK4 must reproduce the exact ballistic arc
    /// (the derivative is linear in the state, so there is no truncation
    /// error to within float rounding).
    #[test]
    fn free_fall_matches_closed_form() {
        let mut nodes = vec![Node::new(Vec3::ZERO, 1.0)];
        let params = ForceParams { drag: 0.0, stiffness: 0.0, gravity: Vec3::new(0.0, -9.8, 0.0) };
        let h = 0.01;
        for _ in 0..100 {
            rk4_step(&mut nodes, &[], h, &params, &Hookean);
        }
        // After 1 s: y = -0.5 * 9.8, v = -9.8.
        assert!((nodes[0].position.y + 4.9).abs() < 1e-3, "y = {}", nodes[0].position.y);
        assert!((nodes[0].velocity.y + 9.8).abs() < 1e-3, "v = {}", nodes[0].velocity.y);
    }

    #[test]
    fn zero_step_is_identity() {
        let mut nodes = vec![Node::new(Vec3::new(1.0, 2.0, 3.0), 0.5)];
        nodes[0].velocity = Vec3::new(0.1, 0.2, 0.3);
        let before = nodes[0].clone();
        let params = ForceParams { drag: 0.1, stiffness: 98.0, gravity: Vec3::new(0.0, -9.8, 0.0) };
        rk4_step(&mut nodes, &[], 0.0, &params, &Hookean);
        assert_eq!(nodes[0].position, before.position);
        assert_eq!(nodes[0].velocity, before.velocity);
    }

    #[test]
    fn locked_node_holds_pose_and_anchors_neighbor() {
        let mut nodes = vec![
            Node::new(Vec3::ZERO, 0.1),
            Node::new(Vec3::new(0.0, -1.0, 0.0), 0.1),
        ];
        nodes[0].locked = true;
        let connections = [Connection { node1: 0, node2: 1, rest_length: 0.5 }];
        let params = ForceParams { drag: 0.0, stiffness: 98.0, gravity: Vec3::new(0.0, -9.8, 0.0) };
        for _ in 0..50 {
            rk4_step(&mut nodes, &connections, 1e-3, &params, &Hookean);
        }
        assert_eq!(nodes[0].position, Vec3::ZERO);
        assert_eq!(nodes[0].velocity, Vec3::ZERO);
        // The stretched spring pulls the free node up against gravity.
        assert!(nodes[1].position.y > -1.0, "y = {}", nodes[1].position.y);
    }
}
