#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Level-based topological sorting of directed graphs that may contain
//! cycles.
//!
//! [`acyclic_toposort`] groups an acyclic graph into maximal dependency
//! levels. [`cyclic_toposort`] first finds a minimum feedback edge set (the
//! fewest edges whose removal leaves the graph acyclic) and then levels what
//! remains; [`cyclic_toposort_groupings`] returns every tied alternative.
//!
//! ```
//! use toposort_core::cyclic_toposort;
//!
//! let topology = cyclic_toposort([(1, 2), (2, 3), (3, 1)], None, None).unwrap();
//! assert_eq!(topology.feedback_edges.len(), 1);
//! assert_eq!(topology.level_count(), 3);
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod index;
pub mod leveler;
pub mod search;

pub use assemble::{
    Topology, cyclic_toposort, cyclic_toposort_groupings, cyclic_toposort_groupings_with_config,
    cyclic_toposort_with_config,
};
pub use config::{SearchConfig, SearchMode, ToposortConfig};
pub use error::ToposortError;
pub use index::GraphIndex;
pub use leveler::acyclic_toposort;
pub use search::feedback_edge_sets;

/// Returns the current version of the toposort-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
