//! Errors returned by the sorting entry points.

use thiserror::Error;

/// All failure conditions of leveling and feedback-edge search.
///
/// Every variant is fatal for the call that produced it: the computation is
/// deterministic, so retrying with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToposortError {
    /// The edge set contains no orderable nodes.
    ///
    /// Raised for an empty edge set and for one made up only of self-loops.
    #[error("graph has no nodes to order")]
    InvalidGraph,

    /// The leveler stalled with nodes left that all still have a dependency.
    ///
    /// Only [`crate::acyclic_toposort`] surfaces this to callers; the cyclic
    /// entry points level graphs that were reduced to acyclic first.
    #[error("cyclic graph detected: {unplaced} node(s) could not be placed")]
    CyclicGraph {
        /// Number of nodes that were never dependencyless.
        unplaced: usize,
    },

    /// The same node was given as both start and end anchor.
    #[error("start node and end node must differ")]
    ConflictingAnchors,

    /// No feedback edge set within the configured budget exists.
    #[error("no feedback edge set with at most {limit} edge(s) exists")]
    SearchBudgetExceeded {
        /// The configured `max_feedback_edges`.
        limit: usize,
    },
}
