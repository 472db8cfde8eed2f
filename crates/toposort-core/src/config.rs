//! Configuration for the cyclic sorting entry points.

/// How exhaustively the feedback-edge search explores tied solutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchMode {
    /// Collect every minimum-cardinality feedback edge set.
    ///
    /// Required to rank ties by level count.
    #[default]
    Exhaustive,
    /// Stop at the first minimum-cardinality feedback edge set found.
    FirstMinimum,
}

/// Tuning knobs for the feedback-edge search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Tie handling.
    ///
    /// Default: [`SearchMode::Exhaustive`].
    pub mode: SearchMode,

    /// Upper bound on the size of the searched feedback edge set.
    ///
    /// Edges forced by the start/end anchors do not count against it. The
    /// search fails with [`crate::ToposortError::SearchBudgetExceeded`] when
    /// every acyclic reduction needs more edges than this.
    ///
    /// Default: `None` (unbounded).
    pub max_feedback_edges: Option<usize>,
}

/// Options for [`crate::cyclic_toposort_with_config`] and
/// [`crate::cyclic_toposort_groupings_with_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToposortConfig<N> {
    /// Node pinned to the first level; every edge into it becomes feedback.
    pub start_node: Option<N>,
    /// Node pinned to the last level; every edge out of it becomes feedback.
    pub end_node: Option<N>,
    /// Search behaviour.
    pub search: SearchConfig,
}

impl<N> Default for ToposortConfig<N> {
    fn default() -> Self {
        Self {
            start_node: None,
            end_node: None,
            search: SearchConfig::default(),
        }
    }
}

impl<N> ToposortConfig<N> {
    /// Builds a config with the given anchors and default search settings.
    pub fn anchored(start_node: Option<N>, end_node: Option<N>) -> Self {
        Self {
            start_node,
            end_node,
            search: SearchConfig::default(),
        }
    }
}
