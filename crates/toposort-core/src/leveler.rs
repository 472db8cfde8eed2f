//! Level-by-level topological sorting of acyclic graphs.
//!
//! Kahn's algorithm, grouped: instead of dequeuing one dependencyless node at
//! a time, every node whose incoming set is empty is placed into the current
//! level at once. Each level is therefore maximal, which gives the fewest
//! possible levels for a given acyclic edge set.
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ToposortError;

/// Sorts an acyclic graph into maximal dependency levels.
///
/// Self-loops are ignored. The first level holds every node without an
/// incoming edge; each subsequent level holds the nodes whose predecessors are
/// all placed in earlier levels.
///
/// # Errors
///
/// - [`ToposortError::InvalidGraph`] if the edge set has no nodes.
/// - [`ToposortError::CyclicGraph`] if a cycle keeps some nodes from ever
///   becoming dependencyless.
pub fn acyclic_toposort<N, I>(edges: I) -> Result<Vec<BTreeSet<N>>, ToposortError>
where
    N: Ord + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    let mut node_ins: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
    for (source, target) in edges {
        if source == target {
            continue;
        }
        node_ins.entry(source.clone()).or_default();
        node_ins.entry(target).or_default().insert(source);
    }
    level_nodes(node_ins)
}

/// Peels `node_ins` into levels. Every node must be a key of `node_ins`.
pub(crate) fn level_nodes<N: Ord + Clone>(
    mut node_ins: BTreeMap<N, BTreeSet<N>>,
) -> Result<Vec<BTreeSet<N>>, ToposortError> {
    if node_ins.is_empty() {
        return Err(ToposortError::InvalidGraph);
    }

    let mut levels = Vec::new();
    while !node_ins.is_empty() {
        let dependencyless: BTreeSet<N> = node_ins
            .iter()
            .filter(|(_, incomings)| incomings.is_empty())
            .map(|(node, _)| node.clone())
            .collect();

        if dependencyless.is_empty() {
            return Err(ToposortError::CyclicGraph {
                unplaced: node_ins.len(),
            });
        }

        for node in &dependencyless {
            node_ins.remove(node);
        }
        for incomings in node_ins.values_mut() {
            incomings.retain(|source| !dependencyless.contains(source));
        }

        levels.push(dependencyless);
    }

    Ok(levels)
}
