use pliant::{CubeConfig, PendulumConfig, SheetConfig, SoftBody};

#[test]
fn pendulum_is_a_valid_chain() {
    let (positions, pairs) = pliant::pendulum(&PendulumConfig { node_count: 100, size: 1.0 });
    assert_eq!(positions.len(), 100);
    assert_eq!(pairs.len(), 99);

    let body = SoftBody::create(&positions, &pairs, 0.002).unwrap();
    // End nodes have one spring, interior nodes two.
    assert_eq!(body.node(0).unwrap().connections.len(), 1);
    assert_eq!(body.node(50).unwrap().connections.len(), 2);
    assert_eq!(body.node(99).unwrap().connections.len(), 1);
}

#[test]
fn pendulum_declines_at_45_degrees() {
    let (positions, _) = pliant::pendulum(&PendulumConfig { node_count: 10, size: 1.0 });
    for p in &positions {
        assert_eq!(p.z, 0.0);
        assert!((p.x + p.y).abs() < 1e-6, "x and -y should match at 45 degrees: {p:?}");
    }
}

#[test]
fn sheet_squares_the_node_count() {
    let (positions, pairs) = pliant::sheet(&SheetConfig { node_count: 1000, size: 1.0 });
    assert_eq!(positions.len(), 31 * 31);

    let body = SoftBody::create(&positions, &pairs, 0.001).unwrap();
    // A fully interior node touches 8 springs: 4 axis neighbors, 4 diagonal.
    let interior = 15 * 31 + 15;
    assert_eq!(body.node(interior).unwrap().connections.len(), 8);
}

#[test]
fn sheet_emits_no_duplicate_pairs() {
    let (_, pairs) = pliant::sheet(&SheetConfig { node_count: 100, size: 1.0 });
    let mut normalized: Vec<(usize, usize)> = pairs
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    normalized.sort_unstable();
    let before = normalized.len();
    normalized.dedup();
    assert_eq!(normalized.len(), before, "duplicate connections in sheet");
}

#[test]
fn cube_connects_full_neighborhoods() {
    let (positions, pairs) = pliant::cube(&CubeConfig { node_count: 27, size: 1.0 });
    assert_eq!(positions.len(), 27);

    let body = SoftBody::create(&positions, &pairs, 0.01).unwrap();
    // The center of a 3x3x3 lattice touches every other node.
    let center = 1 * 9 + 1 * 3 + 1;
    assert_eq!(body.node(center).unwrap().connections.len(), 26);
    // A corner touches its 7 adjacent cells.
    assert_eq!(body.node(0).unwrap().connections.len(), 7);
}

#[test]
fn cube_rounds_down_to_a_perfect_lattice() {
    let (positions, _) = pliant::cube(&CubeConfig { node_count: 999, size: 1.0 });
    assert_eq!(positions.len(), 9 * 9 * 9);
}
