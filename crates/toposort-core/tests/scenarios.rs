//! End-to-end scenarios through the public API.
#![allow(clippy::expect_used)]

use std::collections::BTreeSet;

use toposort_core::{ToposortError, acyclic_toposort, cyclic_toposort};

fn level(nodes: &[u32]) -> BTreeSet<u32> {
    nodes.iter().copied().collect()
}

#[test]
fn chain_sorts_one_node_per_level() {
    let levels = acyclic_toposort([(1u32, 2), (2, 3), (3, 4)]).expect("acyclic");
    assert_eq!(
        levels,
        vec![level(&[1]), level(&[2]), level(&[3]), level(&[4])]
    );
}

#[test]
fn triangle_drops_one_edge() {
    let edges = [(1u32, 2), (2, 3), (3, 1)];
    let topology = cyclic_toposort(edges, None, None).expect("sorts");

    assert_eq!(topology.feedback_edges.len(), 1);
    let dropped = topology.feedback_edges.iter().next().expect("one edge");
    assert!(edges.contains(dropped));
    assert_eq!(topology.level_count(), 3);
}

#[test]
fn self_loop_needs_no_feedback() {
    let topology = cyclic_toposort([(1u32, 1), (1, 2), (2, 3)], None, None).expect("sorts");
    assert_eq!(topology.levels, vec![level(&[1]), level(&[2]), level(&[3])]);
    assert!(topology.feedback_edges.is_empty());
}

#[test]
fn start_node_forces_its_incoming_edge() {
    let topology =
        cyclic_toposort([(1u32, 2), (2, 3), (3, 1), (3, 4)], Some(3), None).expect("sorts");

    assert!(topology.feedback_edges.contains(&(2, 3)));
    assert_eq!(topology.level_of(&3), Some(0));
    assert_eq!(topology.levels[0], level(&[3]));
}

#[test]
fn empty_edges_are_invalid() {
    let edges: Vec<(u32, u32)> = Vec::new();
    assert_eq!(acyclic_toposort(edges), Err(ToposortError::InvalidGraph));
}

#[test]
fn flattened_order_respects_anchors() {
    let edges = [
        ("lint", "build"),
        ("build", "test"),
        ("test", "lint"),
        ("build", "package"),
    ];
    let order = cyclic_toposort(edges, Some("build"), Some("package"))
        .expect("sorts")
        .into_order();

    assert_eq!(order.first(), Some(&"build"));
    assert_eq!(order.last(), Some(&"package"));
    assert_eq!(order.len(), 4);
}
