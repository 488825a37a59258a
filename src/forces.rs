//! Per-tick force evaluation: drag, gravity, and spring forces.

use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::node::Node;
use crate::spring::{Connection, SpringForce};

/// Connections per parallel work unit. Chunk boundaries are fixed, so the
/// reduction order (and therefore the float result) does not depend on
/// thread scheduling.
#[cfg(feature = "parallel")]
const PAR_CHUNK: usize = 256;

/// Parameters sampled once per force evaluation.
#[derive(Clone, Copy, Debug)]
pub struct ForceParams {
    pub drag: f32,
    pub stiffness: f32,
    pub gravity: Vec3,
}

/// Evaluate the net force on every node.
///
/// Resets each accumulator to the drag and gravity contribution, then adds
/// every connection's spring force to both endpoints (equal and opposite).
/// Locked nodes accumulate force like any other; suppressing its effect on
/// their motion is the integrator's job.
pub fn accumulate(
    nodes: &mut [Node],
    connections: &[Connection],
    params: &ForceParams,
    law: &dyn SpringForce,
) {
    for node in nodes.iter_mut() {
        node.force = -params.drag * node.velocity + node.mass * params.gravity;
    }
    spring_pass(nodes, connections, params.stiffness, law);
}

/// Two different connections may share a node, so the spring pass may never
/// apply `+=` to the same accumulator from two workers. Chunks accumulate
/// into thread-local buffers which are then reduced in chunk order on the
/// calling thread.
#[cfg(feature = "parallel")]
fn spring_pass(nodes: &mut [Node], connections: &[Connection], stiffness: f32, law: &dyn SpringForce) {
    if connections.len() < 2 * PAR_CHUNK {
        return spring_pass_serial(nodes, connections, stiffness, law);
    }

    let shared = &*nodes;
    let buffers: Vec<Vec<Vec3>> = connections
        .par_chunks(PAR_CHUNK)
        .map(|chunk| {
            let mut local = vec![Vec3::ZERO; shared.len()];
            for c in chunk {
                let force = law.force(c, shared, stiffness);
                local[c.node1] += force;
                local[c.node2] -= force;
            }
            local
        })
        .collect();

    for buffer in buffers {
        for (node, force) in nodes.iter_mut().zip(buffer) {
            node.force += force;
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn spring_pass(nodes: &mut [Node], connections: &[Connection], stiffness: f32, law: &dyn SpringForce) {
    spring_pass_serial(nodes, connections, stiffness, law);
}

fn spring_pass_serial(
    nodes: &mut [Node],
    connections: &[Connection],
    stiffness: f32,
    law: &dyn SpringForce,
) {
    for c in connections {
        let force = law.force(c, nodes, stiffness);
        nodes[c.node1].force += force;
        nodes[c.node2].force -= force;
    }
}
