//! Topology assembly: from feedback edge candidates to dependency levels.
//!
//! For every candidate returned by the search, the forced-cyclic edges of the
//! anchors are added, the remaining edges are leveled, and the candidates are
//! ranked by feedback edge count and then by level count. Anchors are pinned
//! to the first and last level afterwards.
use std::collections::{BTreeMap, BTreeSet};

use crate::config::ToposortConfig;
use crate::error::ToposortError;
use crate::index::GraphIndex;
use crate::leveler::level_nodes;
use crate::search::feedback_edge_sets;

/// A level ordering of a graph together with the edges it breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology<N: Ord> {
    /// Disjoint, non-empty node sets. Every edge outside `feedback_edges`
    /// points from an earlier level to a later one.
    pub levels: Vec<BTreeSet<N>>,
    /// Edges that had to be dropped to make the graph acyclic, including the
    /// edges forced by the start/end anchors.
    pub feedback_edges: BTreeSet<(N, N)>,
}

impl<N: Ord> Topology<N> {
    /// Number of levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Index of the level holding `node`, if the node is part of the graph.
    pub fn level_of(&self, node: &N) -> Option<usize> {
        self.levels.iter().position(|level| level.contains(node))
    }

    /// All nodes, level by level.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.levels.iter().flatten()
    }

    /// Flattens the levels into a single node order.
    ///
    /// Nodes within a level follow their natural order. With anchors set, the
    /// start node comes first and the end node last.
    pub fn into_order(self) -> Vec<N> {
        self.levels.into_iter().flatten().collect()
    }
}

/// Sorts a possibly cyclic graph into levels, breaking cycles with a minimum
/// feedback edge set.
///
/// `start_node` is pinned to the first level and every edge into it becomes a
/// feedback edge; `end_node` likewise for the last level and its outgoing
/// edges. Among tied minimum feedback edge sets, the one producing the fewest
/// levels wins; remaining ties go to the smallest edge set.
///
/// # Errors
///
/// See [`cyclic_toposort_with_config`].
pub fn cyclic_toposort<N, I>(
    edges: I,
    start_node: Option<N>,
    end_node: Option<N>,
) -> Result<Topology<N>, ToposortError>
where
    N: Ord + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    cyclic_toposort_with_config(edges, &ToposortConfig::anchored(start_node, end_node))
}

/// Like [`cyclic_toposort`], but returns every topology tied for the fewest
/// feedback edges and the fewest levels.
///
/// # Errors
///
/// See [`cyclic_toposort_groupings_with_config`].
pub fn cyclic_toposort_groupings<N, I>(
    edges: I,
    start_node: Option<N>,
    end_node: Option<N>,
) -> Result<Vec<Topology<N>>, ToposortError>
where
    N: Ord + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    cyclic_toposort_groupings_with_config(edges, &ToposortConfig::anchored(start_node, end_node))
}

/// [`cyclic_toposort`] with explicit configuration.
///
/// # Errors
///
/// - [`ToposortError::InvalidGraph`] if the edges contain no nodes.
/// - [`ToposortError::ConflictingAnchors`] if start and end node are equal.
/// - [`ToposortError::SearchBudgetExceeded`] if the configured budget is too
///   small.
pub fn cyclic_toposort_with_config<N, I>(
    edges: I,
    config: &ToposortConfig<N>,
) -> Result<Topology<N>, ToposortError>
where
    N: Ord + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    cyclic_toposort_groupings_with_config(edges, config)?
        .into_iter()
        .next()
        .ok_or(ToposortError::InvalidGraph)
}

/// [`cyclic_toposort_groupings`] with explicit configuration.
///
/// With [`SearchMode::FirstMinimum`] the search stops at the first minimum
/// feedback edge set, so exactly one topology is returned.
///
/// # Errors
///
/// Same as [`cyclic_toposort_with_config`].
pub fn cyclic_toposort_groupings_with_config<N, I>(
    edges: I,
    config: &ToposortConfig<N>,
) -> Result<Vec<Topology<N>>, ToposortError>
where
    N: Ord + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    let edges: BTreeSet<(N, N)> = edges.into_iter().collect();

    if config.start_node.is_some() && config.start_node == config.end_node {
        return Err(ToposortError::ConflictingAnchors);
    }

    let index = GraphIndex::build(&edges, config.start_node.as_ref(), config.end_node.as_ref());
    if index.is_empty() {
        return Err(ToposortError::InvalidGraph);
    }

    let start_node = config.start_node.as_ref().filter(|n| index.contains(n));
    let end_node = config.end_node.as_ref().filter(|n| index.contains(n));

    let candidates = feedback_edge_sets(&index, &config.search)?;
    let forced = index.forced_cyclic_edges();

    let mut best: Vec<Topology<N>> = Vec::new();
    for candidate in candidates {
        let mut feedback_edges = candidate;
        feedback_edges.extend(forced.iter().cloned());

        let mut levels = level_reduced(&index, &edges, &feedback_edges)?;
        pin_anchors(&mut levels, start_node, end_node);

        let topology = Topology {
            levels,
            feedback_edges,
        };
        match best.first().map(Topology::level_count) {
            Some(fewest) if topology.level_count() > fewest => {}
            Some(fewest) if topology.level_count() == fewest => best.push(topology),
            Some(_) | None => best = vec![topology],
        }
    }

    tracing::debug!(
        topologies = best.len(),
        levels = best.first().map_or(0, Topology::level_count),
        "assembled topologies"
    );

    Ok(best)
}

/// Levels every node of `index` using the edges outside `feedback_edges`.
fn level_reduced<N: Ord + Clone>(
    index: &GraphIndex<N>,
    edges: &BTreeSet<(N, N)>,
    feedback_edges: &BTreeSet<(N, N)>,
) -> Result<Vec<BTreeSet<N>>, ToposortError> {
    let mut node_ins: BTreeMap<N, BTreeSet<N>> = index
        .nodes()
        .map(|node| (node.clone(), BTreeSet::new()))
        .collect();

    for edge in edges.difference(feedback_edges) {
        let (source, target) = edge;
        if source == target {
            continue;
        }
        if let Some(incomings) = node_ins.get_mut(target) {
            incomings.insert(source.clone());
        }
    }

    level_nodes(node_ins)
}

/// Moves the start node into the first level and the end node into the last
/// one, dropping any level left empty.
///
/// The start node has no incoming edge after forcing, and the end node no
/// outgoing one, so neither move can invert a remaining edge.
fn pin_anchors<N: Ord + Clone>(
    levels: &mut Vec<BTreeSet<N>>,
    start_node: Option<&N>,
    end_node: Option<&N>,
) {
    if let Some(start) = start_node {
        for level in levels.iter_mut().skip(1) {
            level.remove(start);
        }
        if let Some(first) = levels.first_mut() {
            first.insert(start.clone());
        }
    }
    if let Some(end) = end_node {
        let last = levels.len().saturating_sub(1);
        for level in levels.iter_mut().take(last) {
            level.remove(end);
        }
        if let Some(last) = levels.last_mut() {
            last.insert(end.clone());
        }
    }
    levels.retain(|level| !level.is_empty());
}
