use glam::Vec3;
use pliant::{BuildError, SheetConfig, SoftBody};

fn ten_nodes() -> Vec<Vec3> {
    (0..10).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
}

#[test]
fn rest_lengths_match_initial_distances() {
    let (positions, pairs) = pliant::sheet(&SheetConfig { node_count: 100, size: 1.0 });
    let body = SoftBody::create(&positions, &pairs, 0.01).unwrap();

    let nodes = body.positions();
    for c in body.connections() {
        let length = nodes[c.node1].distance(nodes[c.node2]);
        assert!(
            (length - c.rest_length).abs() < 1e-6,
            "connection ({}, {}): length {} vs rest {}",
            c.node1, c.node2, length, c.rest_length,
        );
    }
}

#[test]
fn self_loop_is_rejected() {
    let err = SoftBody::create(&ten_nodes(), &[(5, 5)], 0.1).unwrap_err();
    assert_eq!(err, BuildError::SelfConnection { index: 0, node: 5 });
}

#[test]
fn out_of_range_index_is_rejected() {
    let err = SoftBody::create(&ten_nodes(), &[(5, 1000)], 0.1).unwrap_err();
    assert_eq!(err, BuildError::NodeOutOfRange { index: 0, node: 1000, count: 10 });
}

#[test]
fn non_positive_mass_is_rejected() {
    for mass in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let result = SoftBody::create(&ten_nodes(), &[(0, 1)], mass);
        assert!(result.is_err(), "mass {} should be rejected", mass);
    }
}

#[test]
fn draw_starts_as_faithful_snapshot() {
    let positions = ten_nodes();
    let body = SoftBody::create(&positions, &[(0, 1), (1, 2)], 0.1).unwrap();
    assert_eq!(body.positions(), positions);
    assert_eq!(body.connection_pairs(), vec![(0, 1), (1, 2)]);
    assert_eq!(body.node_count(), 10);
    assert_eq!(body.connection_count(), 2);
}

#[test]
fn error_messages_name_the_offender() {
    let err = SoftBody::create(&ten_nodes(), &[(0, 1), (3, 12)], 0.1).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("connection 1"), "message: {message}");
    assert!(message.contains("node 12"), "message: {message}");
}
