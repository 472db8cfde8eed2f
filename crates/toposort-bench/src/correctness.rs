//! Post-sort invariant checkers for correctness validation.

use std::collections::BTreeSet;
use std::fmt::Debug;

use toposort_core::Topology;

/// Verifies a topology against the edges it was computed from:
/// - every node of a non-self-loop edge is placed exactly once
/// - no level is empty
/// - every edge outside the feedback set points to a later level
/// - the start node sits in the first level and the end node in the last,
///   with their offending edges in the feedback set
pub fn check_topology<N: Ord + Debug>(
    edges: &[(N, N)],
    topology: &Topology<N>,
    start_node: Option<&N>,
    end_node: Option<&N>,
) -> Result<(), String> {
    let expected: BTreeSet<&N> = edges
        .iter()
        .filter(|(source, target)| source != target)
        .flat_map(|(source, target)| [source, target])
        .collect();

    let mut placed = BTreeSet::new();
    for (idx, level) in topology.levels.iter().enumerate() {
        if level.is_empty() {
            return Err(format!("level {idx} is empty"));
        }
        for node in level {
            if !placed.insert(node) {
                return Err(format!("node {node:?} placed twice"));
            }
        }
    }
    if placed != expected {
        return Err(format!(
            "placed nodes differ from graph nodes: placed={placed:?}, expected={expected:?}"
        ));
    }

    for edge in edges {
        let (source, target) = edge;
        if source == target || topology.feedback_edges.contains(edge) {
            continue;
        }
        let from = topology
            .level_of(source)
            .ok_or_else(|| format!("source {source:?} not placed"))?;
        let to = topology
            .level_of(target)
            .ok_or_else(|| format!("target {target:?} not placed"))?;
        if from >= to {
            return Err(format!(
                "edge {edge:?} runs from level {from} to level {to}"
            ));
        }
    }

    if let Some(start) = start_node.filter(|node| expected.contains(node)) {
        if topology.level_of(start) != Some(0) {
            return Err(format!("start node {start:?} is not in the first level"));
        }
        let into_start = |(source, target): &(N, N)| target == start && source != start;
        check_forced(edges, topology, into_start)?;
    }
    if let Some(end) = end_node.filter(|node| expected.contains(node)) {
        let last = topology.level_count().saturating_sub(1);
        if topology.level_of(end) != Some(last) {
            return Err(format!("end node {end:?} is not in the last level"));
        }
        let out_of_end = |(source, target): &(N, N)| source == end && target != end;
        check_forced(edges, topology, out_of_end)?;
    }

    Ok(())
}

fn check_forced<N: Ord + Debug>(
    edges: &[(N, N)],
    topology: &Topology<N>,
    is_forced: impl Fn(&(N, N)) -> bool,
) -> Result<(), String> {
    match edges
        .iter()
        .find(|edge| is_forced(*edge) && !topology.feedback_edges.contains(*edge))
    {
        Some(edge) => Err(format!("anchor edge {edge:?} is not a feedback edge")),
        None => Ok(()),
    }
}
