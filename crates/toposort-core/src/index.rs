//! Incoming/outgoing adjacency for an edge set, with anchor forcing.
//!
//! [`GraphIndex::build`] makes one pass over the edges:
//! 1. Self-loops are skipped; they cannot order two distinct nodes.
//! 2. Both endpoints are registered in `node_ins` and `node_outs`, so every
//!    node of the graph is a key of both maps even with no neighbours.
//! 3. An edge into the start node, or out of the end node, is recorded as
//!    forced-cyclic and kept out of the adjacency.
//! 4. Every other edge is added to the adjacency.
use std::collections::{BTreeMap, BTreeSet};

use crate::search::Residual;

/// Adjacency maps and forced-cyclic edges of one edge set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIndex<N: Ord> {
    node_ins: BTreeMap<N, BTreeSet<N>>,
    node_outs: BTreeMap<N, BTreeSet<N>>,
    forced_cyclic: BTreeSet<(N, N)>,
}

impl<N: Ord + Clone> GraphIndex<N> {
    /// Indexes `edges`, forcing edges that violate the anchors into the
    /// forced-cyclic set.
    pub fn build<'a, I>(edges: I, start_node: Option<&N>, end_node: Option<&N>) -> Self
    where
        I: IntoIterator<Item = &'a (N, N)>,
        N: 'a,
    {
        let mut node_ins: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
        let mut node_outs: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
        let mut forced_cyclic = BTreeSet::new();

        for (source, target) in edges {
            if source == target {
                continue;
            }

            for node in [source, target] {
                node_ins.entry(node.clone()).or_default();
                node_outs.entry(node.clone()).or_default();
            }

            if start_node == Some(target) || end_node == Some(source) {
                forced_cyclic.insert((source.clone(), target.clone()));
                continue;
            }

            node_outs
                .entry(source.clone())
                .or_default()
                .insert(target.clone());
            node_ins
                .entry(target.clone())
                .or_default()
                .insert(source.clone());
        }

        Self {
            node_ins,
            node_outs,
            forced_cyclic,
        }
    }

    /// Builds the dense-index residual graph the feedback-edge search runs on.
    ///
    /// Node indices follow the key order of `node_ins`; edge ids follow the
    /// order of [`GraphIndex::edges`]. The returned vector maps edge ids back
    /// to node pairs.
    pub(crate) fn residual(&self) -> (Residual, Vec<(N, N)>) {
        let position: BTreeMap<&N, usize> = self
            .node_ins
            .keys()
            .enumerate()
            .map(|(idx, node)| (node, idx))
            .collect();

        let mut pairs = Vec::new();
        let mut indexed = Vec::new();
        for (source, target) in self.edges() {
            if let (Some(&s), Some(&t)) = (position.get(source), position.get(target)) {
                indexed.push((s, t));
                pairs.push((source.clone(), target.clone()));
            }
        }

        (Residual::new(position.len(), &indexed), pairs)
    }
}

impl<N: Ord> GraphIndex<N> {
    /// Node → set of nodes with an edge into it.
    pub fn node_ins(&self) -> &BTreeMap<N, BTreeSet<N>> {
        &self.node_ins
    }

    /// Node → set of nodes it has an edge to.
    pub fn node_outs(&self) -> &BTreeMap<N, BTreeSet<N>> {
        &self.node_outs
    }

    /// Edges excluded from the adjacency by the start/end anchors.
    pub fn forced_cyclic_edges(&self) -> &BTreeSet<(N, N)> {
        &self.forced_cyclic
    }

    /// Number of distinct nodes touched by a non-self-loop edge.
    pub fn node_count(&self) -> usize {
        self.node_ins.len()
    }

    /// Returns `true` when the index holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.node_ins.is_empty()
    }

    /// Returns `true` if `node` is part of the indexed graph.
    pub fn contains(&self, node: &N) -> bool {
        self.node_ins.contains_key(node)
    }

    /// All nodes, in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.node_ins.keys()
    }

    /// The adjacency edges (forced-cyclic edges excluded), ordered by source
    /// then target.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.node_outs
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(nodes: &[u32]) -> BTreeSet<u32> {
        nodes.iter().copied().collect()
    }

    #[test]
    fn builds_both_maps_with_every_node() {
        let edges = [(1, 3), (2, 3), (3, 4)];
        let index = GraphIndex::build(&edges, None, None);

        let expected_ins: BTreeMap<u32, BTreeSet<u32>> = [
            (1, set(&[])),
            (2, set(&[])),
            (3, set(&[1, 2])),
            (4, set(&[3])),
        ]
        .into_iter()
        .collect();
        let expected_outs: BTreeMap<u32, BTreeSet<u32>> = [
            (1, set(&[3])),
            (2, set(&[3])),
            (3, set(&[4])),
            (4, set(&[])),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.node_ins(), &expected_ins);
        assert_eq!(index.node_outs(), &expected_outs);
        assert!(index.forced_cyclic_edges().is_empty());
        assert_eq!(index.node_count(), 4);
    }

    #[test]
    fn empty_edge_set_gives_empty_maps() {
        let edges: [(u32, u32); 0] = [];
        let index = GraphIndex::build(&edges, None, None);
        assert!(index.is_empty());
        assert!(index.node_outs().is_empty());
    }

    #[test]
    fn self_loops_are_skipped() {
        let edges = [(1, 1), (1, 2), (5, 5)];
        let index = GraphIndex::build(&edges, None, None);
        assert_eq!(index.nodes().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(!index.contains(&5));
        assert_eq!(index.edges().count(), 1);
    }

    #[test]
    fn start_node_forces_incoming_edges() {
        let edges = [(1, 2), (2, 3), (3, 1), (3, 4)];
        let index = GraphIndex::build(&edges, Some(&3), None);

        assert_eq!(
            index.forced_cyclic_edges(),
            &[(2, 3)].into_iter().collect::<BTreeSet<_>>()
        );
        assert!(index.node_ins()[&3].is_empty());
        assert!(index.node_outs()[&2].is_empty());
        // Anchor stays registered even though its only incoming edge is forced.
        assert!(index.contains(&3));
    }

    #[test]
    fn end_node_forces_outgoing_edges() {
        let edges = [(1, 2), (2, 1), (2, 3)];
        let index = GraphIndex::build(&edges, None, Some(&2));

        let forced: BTreeSet<_> = [(2, 1), (2, 3)].into_iter().collect();
        assert_eq!(index.forced_cyclic_edges(), &forced);
        assert!(index.node_outs()[&2].is_empty());
        assert!(index.node_ins()[&3].is_empty());
        assert_eq!(index.node_count(), 3);
    }

    #[test]
    fn edge_from_end_to_start_is_forced_once() {
        let edges = [(9, 1), (1, 9)];
        let index = GraphIndex::build(&edges, Some(&1), Some(&9));
        assert_eq!(
            index.forced_cyclic_edges(),
            &[(9, 1)].into_iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(index.edges().collect::<Vec<_>>(), vec![(&1, &9)]);
    }

    #[test]
    fn residual_maps_edge_ids_back_to_pairs() {
        let edges = [("b", "a"), ("a", "c"), ("c", "b")];
        let index = GraphIndex::build(&edges, None, None);
        let (residual, pairs) = index.residual();

        assert_eq!(pairs, vec![("a", "c"), ("b", "a"), ("c", "b")]);
        assert_eq!(residual.alive_node_count(), 3);
        assert_eq!(residual.alive_edges(), vec![0, 1, 2]);
    }
}
