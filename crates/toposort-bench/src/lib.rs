//! Random graph generator, brute-force oracle and benchmark utilities for
//! `toposort-core`.
//!
//! The generator is seeded, so every fixture, test and benchmark sees the
//! same graphs on every run. The oracle enumerates edge subsets directly and
//! is only practical for graphs with a dozen or so edges.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;
pub mod oracle;

pub use generator::{Edge, GraphConfig, SizeTier, generate_graph};
pub use oracle::{OracleGrouping, bruteforce_feedback_sets, bruteforce_groupings};

/// Returns the directory generated JSON fixtures are written to.
///
/// The directory lives under `target/bench-fixtures/` so it is
/// automatically gitignored and shared between the generator binary and
/// the benchmark harness.
pub fn fixtures_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
}
