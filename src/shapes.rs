//! Benchmark geometry builders: pendulum, sheet, and cube topologies.
//!
//! Each builder returns `(positions, connection pairs)` ready to feed
//! [`SoftBody::create`](crate::SoftBody::create), sized by an explicit
//! config instead of ambient parameters.

use std::f32::consts::PI;

use glam::Vec3;

/// Configuration for a pendulum chain.
pub struct PendulumConfig {
    /// Number of nodes along the chain. Clamped to at least 2.
    pub node_count: usize,
    /// Total chain length.
    pub size: f32,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        PendulumConfig { node_count: 1000, size: 1.0 }
    }
}

/// A chain of nodes along a 45-degree declined line, consecutive nodes
/// connected. Lock node 0 to hang it.
pub fn pendulum(config: &PendulumConfig) -> (Vec<Vec3>, Vec<(usize, usize)>) {
    let count = config.node_count.max(2);
    let angle = PI / 4.0;
    let spacing = config.size / count as f32;
    let direction = Vec3::new(angle.cos(), -angle.sin(), 0.0) * spacing;

    let positions: Vec<Vec3> = (0..count).map(|i| direction * i as f32).collect();
    let pairs: Vec<(usize, usize)> = (0..count - 1).map(|i| (i, i + 1)).collect();
    (positions, pairs)
}

/// Configuration for a square sheet.
pub struct SheetConfig {
    /// Target node count; the sheet uses the largest square not above it.
    pub node_count: usize,
    /// Edge length of the sheet.
    pub size: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig { node_count: 1000, size: 1.0 }
    }
}

/// A flat grid in the XZ plane with right/front neighbors and both
/// diagonals connected. Lock the four corners to suspend it.
pub fn sheet(config: &SheetConfig) -> (Vec<Vec3>, Vec<(usize, usize)>) {
    let side = int_root(config.node_count, 2).max(2);
    let spacing = config.size / side as f32;

    let mut positions = Vec::with_capacity(side * side);
    for x in 0..side {
        for z in 0..side {
            positions.push(Vec3::new(x as f32 * spacing, 0.0, z as f32 * spacing));
        }
    }

    let offsets: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    let mut pairs = Vec::new();
    for x in 0..side {
        for z in 0..side {
            for (dx, dz) in offsets {
                let (nx, nz) = (x as isize + dx, z as isize + dz);
                if nx < 0 || nz < 0 || nx >= side as isize || nz >= side as isize {
                    continue;
                }
                pairs.push((x * side + z, nx as usize * side + nz as usize));
            }
        }
    }
    (positions, pairs)
}

/// Configuration for a solid cube lattice.
pub struct CubeConfig {
    /// Target node count; the cube uses the largest s^3 not above it.
    pub node_count: usize,
    /// Edge length of the cube.
    pub size: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        CubeConfig { node_count: 1000, size: 1.0 }
    }
}

/// A cubic lattice with every node connected to all of its (up to 26)
/// lattice neighbors. Lock the y = 0 face to anchor it.
pub fn cube(config: &CubeConfig) -> (Vec<Vec3>, Vec<(usize, usize)>) {
    let side = int_root(config.node_count, 3).max(2);
    let spacing = config.size / side as f32;
    let index_of = |x: usize, y: usize, z: usize| x * side * side + y * side + z;

    let mut positions = Vec::with_capacity(side * side * side);
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                positions.push(Vec3::new(x as f32, y as f32, z as f32) * spacing);
            }
        }
    }

    let mut pairs = Vec::new();
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                let this = index_of(x, y, z);
                for dx in -1isize..=1 {
                    for dy in -1isize..=1 {
                        for dz in -1isize..=1 {
                            if (dx, dy, dz) == (0, 0, 0) {
                                continue;
                            }
                            let (nx, ny, nz) =
                                (x as isize + dx, y as isize + dy, z as isize + dz);
                            if nx < 0 || ny < 0 || nz < 0 {
                                continue;
                            }
                            let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                            if nx >= side || ny >= side || nz >= side {
                                continue;
                            }
                            let neighbor = index_of(nx, ny, nz);
                            // Each undirected link is emitted once.
                            if neighbor > this {
                                pairs.push((this, neighbor));
                            }
                        }
                    }
                }
            }
        }
    }
    (positions, pairs)
}

/// Largest integer s with s^k <= n.
fn int_root(n: usize, k: u32) -> usize {
    let mut s = (n as f64).powf(1.0 / k as f64).round() as usize;
    while s > 0 && s.pow(k) > n {
        s -= 1;
    }
    while (s + 1).pow(k) <= n {
        s += 1;
    }
    s
}
