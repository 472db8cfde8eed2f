//! Compact residual graph with an undo log.
//!
//! Nodes and edges are dense `usize` ids. Removal only flips liveness flags
//! and adjusts degree counters, and each removal is appended to an undo log.
//! A search branch takes a [`Residual::checkpoint`], mutates freely and calls
//! [`Residual::rollback`] before returning, so sibling branches always start
//! from the same state without copying adjacency.
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Node(usize),
    Edge(usize),
}

/// Residual graph state shared by every branch of one search.
#[derive(Debug, Clone)]
pub(crate) struct Residual {
    endpoints: Vec<(usize, usize)>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
    node_alive: Vec<bool>,
    edge_alive: Vec<bool>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
    alive_nodes: usize,
    undo: Vec<Change>,
}

impl Residual {
    /// Creates a residual over `node_count` nodes and the given
    /// `(source, target)` edges. Edge ids are positions in `edges`.
    pub(crate) fn new(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut out_edges = vec![Vec::new(); node_count];
        let mut in_edges = vec![Vec::new(); node_count];
        let mut in_degree = vec![0; node_count];
        let mut out_degree = vec![0; node_count];

        for (edge, &(source, target)) in edges.iter().enumerate() {
            out_edges[source].push(edge);
            in_edges[target].push(edge);
            out_degree[source] += 1;
            in_degree[target] += 1;
        }

        Self {
            endpoints: edges.to_vec(),
            out_edges,
            in_edges,
            node_alive: vec![true; node_count],
            edge_alive: vec![true; edges.len()],
            in_degree,
            out_degree,
            alive_nodes: node_count,
            undo: Vec::new(),
        }
    }

    pub(crate) fn alive_node_count(&self) -> usize {
        self.alive_nodes
    }

    /// Ids of the edges still present, ascending.
    pub(crate) fn alive_edges(&self) -> Vec<usize> {
        (0..self.endpoints.len())
            .filter(|&edge| self.edge_alive[edge])
            .collect()
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.undo.len()
    }

    /// Reverts every change made since `mark` was taken.
    pub(crate) fn rollback(&mut self, mark: usize) {
        while self.undo.len() > mark {
            match self.undo.pop() {
                Some(Change::Edge(edge)) => {
                    let (source, target) = self.endpoints[edge];
                    self.edge_alive[edge] = true;
                    self.out_degree[source] += 1;
                    self.in_degree[target] += 1;
                }
                Some(Change::Node(node)) => {
                    self.node_alive[node] = true;
                    self.alive_nodes += 1;
                }
                None => break,
            }
        }
    }

    pub(crate) fn remove_edge(&mut self, edge: usize) {
        if !self.edge_alive[edge] {
            return;
        }
        let (source, target) = self.endpoints[edge];
        self.edge_alive[edge] = false;
        self.out_degree[source] -= 1;
        self.in_degree[target] -= 1;
        self.undo.push(Change::Edge(edge));
    }

    fn remove_node(&mut self, node: usize) {
        if !self.node_alive[node] {
            return;
        }
        for idx in 0..self.out_edges[node].len() {
            let edge = self.out_edges[node][idx];
            self.remove_edge(edge);
        }
        for idx in 0..self.in_edges[node].len() {
            let edge = self.in_edges[node][idx];
            self.remove_edge(edge);
        }
        self.node_alive[node] = false;
        self.alive_nodes -= 1;
        self.undo.push(Change::Node(node));
    }

    fn alive_where(&self, pred: impl Fn(usize) -> bool) -> Vec<usize> {
        (0..self.node_alive.len())
            .filter(|&node| self.node_alive[node] && pred(node))
            .collect()
    }

    /// Strips dependencyless and followerless nodes until neither kind is
    /// left. Returns the number of nodes removed.
    ///
    /// Forward peeling runs first; backward peeling only runs once forward
    /// peeling stalls, after which forward peeling gets another chance.
    pub(crate) fn peel(&mut self) -> usize {
        let before = self.alive_nodes;
        loop {
            let dependencyless = self.alive_where(|node| self.in_degree[node] == 0);
            if !dependencyless.is_empty() {
                for node in dependencyless {
                    self.remove_node(node);
                }
                continue;
            }

            let followerless = self.alive_where(|node| self.out_degree[node] == 0);
            if followerless.is_empty() {
                break;
            }
            for node in followerless {
                self.remove_node(node);
            }
        }
        before - self.alive_nodes
    }

    /// Non-trivial strongly connected components of the live graph, each
    /// sorted, ordered by their smallest node.
    pub(crate) fn cyclic_components(&self) -> Vec<Vec<usize>> {
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for node in self.alive_where(|_| true) {
            graph.add_node(node);
        }
        for edge in self.alive_edges() {
            let (source, target) = self.endpoints[edge];
            graph.add_edge(source, target, ());
        }

        let mut components: Vec<Vec<usize>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|mut component| {
                component.sort_unstable();
                component
            })
            .collect();
        components.sort_unstable();
        components
    }

    /// Removes every live node outside `component`.
    pub(crate) fn isolate(&mut self, component: &[usize]) {
        let mut keep = vec![false; self.node_alive.len()];
        for &node in component {
            keep[node] = true;
        }
        for node in self.alive_where(|node| !keep[node]) {
            self.remove_node(node);
        }
    }
}
