//! Minimum feedback edge search.
//!
//! The search alternates two cheap reductions with one expensive step:
//!
//! 1. **Peeling.** Dependencyless nodes (no incoming edge) and followerless
//!    nodes (no outgoing edge) cannot lie on a cycle, so they and their edges
//!    are dropped. Forward and backward peeling alternate until both stall.
//! 2. **Splitting.** The remainder falls apart into strongly connected
//!    components. Edges between components lie on no cycle; each non-trivial
//!    component is a cyclic core solved on its own, and the per-core optima
//!    combine as a cartesian product.
//! 3. **Resolution.** For one core, candidate edge subsets are tried in
//!    increasing size and lexicographic combination order. Each candidate is
//!    removed and the reduced core is searched recursively with the budget
//!    that is left. The running minimum bounds every later candidate.
//!
//! Top-level cores are resolved by iterative deepening: budgets 1, 2, ... are
//! tried in turn, so no branch searches deeper than the core's true minimum.
//! Recursive candidates only use edge ids above the largest id removed so
//! far, so an edge set is reached through increasing removal orders only.
//!
//! All mutation happens on one [`Residual`] and is rolled back through its
//! undo log when a branch returns.
use std::collections::BTreeSet;

use itertools::Itertools;

use crate::config::{SearchConfig, SearchMode};
use crate::error::ToposortError;
use crate::index::GraphIndex;

mod residual;

pub(crate) use residual::Residual;

/// Every minimum feedback edge set of the adjacency held by `index`.
///
/// Forced-cyclic edges of the index are not part of the search and are not
/// included in the returned sets. An acyclic adjacency yields a single empty
/// set. With [`SearchMode::FirstMinimum`] exactly one set is returned.
///
/// Sets are returned in ascending order.
///
/// # Errors
///
/// [`ToposortError::SearchBudgetExceeded`] if `config.max_feedback_edges` is
/// smaller than the minimum feedback edge set.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = index.node_count()))]
pub fn feedback_edge_sets<N: Ord + Clone>(
    index: &GraphIndex<N>,
    config: &SearchConfig,
) -> Result<Vec<BTreeSet<(N, N)>>, ToposortError> {
    let (mut residual, pairs) = index.residual();
    let limit = config.max_feedback_edges.unwrap_or(usize::MAX);

    let mut search = FeedbackSearch::new(&mut residual, config.mode);
    let solutions = search
        .solve(limit)
        .ok_or(ToposortError::SearchBudgetExceeded { limit })?;

    tracing::debug!(
        edges = pairs.len(),
        cores = search.cores,
        candidates = search.candidates,
        minimum = solutions.size,
        solutions = solutions.sets.len(),
        "feedback edge search finished"
    );

    Ok(solutions
        .sets
        .into_iter()
        .map(|set| set.into_iter().map(|edge| pairs[edge].clone()).collect())
        .collect())
}

/// Feedback edge sets of one (sub)graph, all of cardinality `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Solutions {
    pub(crate) size: usize,
    pub(crate) sets: BTreeSet<BTreeSet<usize>>,
}

impl Solutions {
    fn acyclic() -> Self {
        Self {
            size: 0,
            sets: BTreeSet::from([BTreeSet::new()]),
        }
    }

    /// Combines the solutions of two independent cores.
    fn product(self, other: &Solutions) -> Self {
        let mut sets = BTreeSet::new();
        for left in &self.sets {
            for right in &other.sets {
                sets.insert(left.union(right).copied().collect());
            }
        }
        Self {
            size: self.size + other.size,
            sets,
        }
    }

    /// Adds the same removed edges to every set.
    fn with_removed(self, removed: &[usize]) -> Self {
        let sets = self
            .sets
            .into_iter()
            .map(|mut set| {
                set.extend(removed.iter().copied());
                set
            })
            .collect();
        Self {
            size: self.size + removed.len(),
            sets,
        }
    }
}

pub(crate) struct FeedbackSearch<'a> {
    residual: &'a mut Residual,
    mode: SearchMode,
    cores: usize,
    candidates: usize,
}

impl<'a> FeedbackSearch<'a> {
    pub(crate) fn new(residual: &'a mut Residual, mode: SearchMode) -> Self {
        Self {
            residual,
            mode,
            cores: 0,
            candidates: 0,
        }
    }

    /// Minimum feedback edge sets of the live residual with at most `limit`
    /// edges, or `None` if none that small exists. Leaves the residual as it
    /// found it.
    pub(crate) fn solve(&mut self, limit: usize) -> Option<Solutions> {
        self.combine_cores(limit, 0, true)
    }

    /// Peels the residual and resolves each cyclic core with what is left of
    /// `limit`, using only edge ids of at least `floor`.
    fn combine_cores(&mut self, limit: usize, floor: usize, deepen: bool) -> Option<Solutions> {
        let mark = self.residual.checkpoint();
        self.residual.peel();

        let mut combined = Solutions::acyclic();
        for component in self.residual.cyclic_components() {
            self.cores += 1;
            let inner = self.residual.checkpoint();
            self.residual.isolate(&component);
            let remaining = limit - combined.size;
            let resolved = if deepen {
                self.deepen(remaining, floor)
            } else {
                self.resolve_core(remaining, floor)
            };
            self.residual.rollback(inner);

            match resolved {
                Some(solutions) => combined = combined.product(&solutions),
                None => {
                    self.residual.rollback(mark);
                    return None;
                }
            }
        }

        self.residual.rollback(mark);
        Some(combined)
    }

    /// Resolves the isolated core with budgets 1, 2, ... up to `limit` and
    /// returns the first that succeeds.
    fn deepen(&mut self, limit: usize, floor: usize) -> Option<Solutions> {
        let eligible = self.eligible_edges(floor).len();
        (1..=limit.min(eligible)).find_map(|bound| self.resolve_core(bound, floor))
    }

    fn eligible_edges(&self, floor: usize) -> Vec<usize> {
        self.residual
            .alive_edges()
            .into_iter()
            .filter(|&edge| edge >= floor)
            .collect()
    }

    /// Branches over subsets of the isolated core's edges with ids of at
    /// least `floor`.
    fn resolve_core(&mut self, limit: usize, floor: usize) -> Option<Solutions> {
        let core_edges = self.eligible_edges(floor);
        let mut best: Option<Solutions> = None;
        let mut bound = limit;

        for size in 1..=core_edges.len() {
            if size > bound {
                break;
            }
            for candidate in core_edges.iter().copied().combinations(size) {
                if size > bound {
                    break;
                }
                self.candidates += 1;

                let mark = self.residual.checkpoint();
                for &edge in &candidate {
                    self.residual.remove_edge(edge);
                }
                let next_floor = candidate.last().map_or(floor, |&edge| edge + 1);
                let rest = self.combine_cores(bound - size, next_floor, false);
                self.residual.rollback(mark);

                let Some(rest) = rest else {
                    continue;
                };
                let found = rest.with_removed(&candidate);
                let total = found.size;

                best = match best {
                    Some(mut current) if current.size == total => {
                        current.sets.extend(found.sets);
                        Some(current)
                    }
                    Some(_) | None => Some(found),
                };
                bound = match self.mode {
                    SearchMode::Exhaustive => total,
                    SearchMode::FirstMinimum => total - 1,
                };
            }
        }

        if let Some(solutions) = &best {
            tracing::trace!(
                edges = core_edges.len(),
                minimum = solutions.size,
                "resolved cyclic core"
            );
        }
        best
    }
}
