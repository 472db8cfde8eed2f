//! Brute-force reference answers for small graphs.
//!
//! Tries every edge subset in increasing size and keeps the smallest ones
//! whose removal leaves the graph acyclic, checked with `petgraph`. Exponential
//! in the edge count; intended for graphs with at most a dozen or so edges.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;

use crate::generator::Edge;

/// One tied optimum: a feedback edge set and the level count it yields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OracleGrouping {
    /// Searched edges plus the edges forced by the anchors.
    pub feedback_edges: BTreeSet<Edge>,
    /// Number of levels once `feedback_edges` are removed.
    pub level_count: usize,
}

/// Every minimum-cardinality feedback edge set of `edges`, ascending.
///
/// Self-loops are ignored. Edges into `start_node` and out of `end_node` are
/// left out of the enumeration and added to every returned set.
pub fn bruteforce_feedback_sets(
    edges: &[Edge],
    start_node: Option<u32>,
    end_node: Option<u32>,
) -> Vec<BTreeSet<Edge>> {
    let (searchable, forced) = split_forced(edges, start_node, end_node);
    let nodes = nodes_of(edges);

    for size in 0..=searchable.len() {
        let found: Vec<BTreeSet<Edge>> = searchable
            .iter()
            .copied()
            .combinations(size)
            .filter(|removed| {
                let kept = searchable.iter().filter(|edge| !removed.contains(*edge));
                !is_cyclic_directed(&build_graph(&nodes, kept))
            })
            .map(|removed| removed.into_iter().chain(forced.iter().copied()).collect())
            .collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// The minimum feedback edge sets that also minimise the level count.
pub fn bruteforce_groupings(
    edges: &[Edge],
    start_node: Option<u32>,
    end_node: Option<u32>,
) -> Vec<OracleGrouping> {
    let nodes = nodes_of(edges);
    let mut groupings: Vec<OracleGrouping> = bruteforce_feedback_sets(edges, start_node, end_node)
        .into_iter()
        .filter_map(|feedback_edges| {
            let kept = edges.iter().filter(|edge| !feedback_edges.contains(*edge));
            let level_count = longest_path_nodes(&build_graph(&nodes, kept))?;
            Some(OracleGrouping {
                feedback_edges,
                level_count,
            })
        })
        .collect();

    if let Some(fewest) = groupings.iter().map(|g| g.level_count).min() {
        groupings.retain(|g| g.level_count == fewest);
    }
    groupings.sort();
    groupings
}

fn split_forced(
    edges: &[Edge],
    start_node: Option<u32>,
    end_node: Option<u32>,
) -> (Vec<Edge>, BTreeSet<Edge>) {
    let unique: BTreeSet<Edge> = edges
        .iter()
        .copied()
        .filter(|(source, target)| source != target)
        .collect();
    let (forced, searchable): (BTreeSet<Edge>, BTreeSet<Edge>) = unique
        .into_iter()
        .partition(|&(source, target)| Some(target) == start_node || Some(source) == end_node);
    (searchable.into_iter().collect(), forced)
}

fn nodes_of(edges: &[Edge]) -> BTreeSet<u32> {
    edges
        .iter()
        .filter(|(source, target)| source != target)
        .flat_map(|&(source, target)| [source, target])
        .collect()
}

fn build_graph<'a>(
    nodes: &BTreeSet<u32>,
    edges: impl Iterator<Item = &'a Edge>,
) -> DiGraphMap<u32, ()> {
    let mut graph = DiGraphMap::new();
    for &node in nodes {
        graph.add_node(node);
    }
    for &(source, target) in edges {
        if source != target {
            graph.add_edge(source, target, ());
        }
    }
    graph
}

/// Node count of the longest path, which equals the number of maximal
/// levels. `None` if the graph still has a cycle.
fn longest_path_nodes(graph: &DiGraphMap<u32, ()>) -> Option<usize> {
    let order = toposort(graph, None).ok()?;
    let mut depth: BTreeMap<u32, usize> = BTreeMap::new();
    for node in order {
        let level = graph
            .neighbors_directed(node, petgraph::Direction::Incoming)
            .filter_map(|pred| depth.get(&pred))
            .map(|d| d + 1)
            .max()
            .unwrap_or(1);
        depth.insert(node, level);
    }
    depth.values().copied().max()
}
