//! Random graph generator.
//!
//! Graphs grow one edge at a time from the single edge `1 → 2`. Each new edge
//! draws its endpoints from the existing nodes plus one fresh node, so the
//! node count grows with the edge count and cycles appear naturally once
//! later nodes point back to earlier ones.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A directed edge between two generated node ids.
pub type Edge = (u32, u32);

/// Configuration for the graph generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of distinct edges to generate. At least one edge is always
    /// produced.
    pub num_edges: usize,
    /// Whether an edge may start and end at the same node.
    pub allow_self_loops: bool,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 8 edges
    Small,
    /// 12 edges
    Medium,
    /// 16 edges
    Large,
}

impl SizeTier {
    /// All tiers, smallest first.
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    /// Returns the default `GraphConfig` for this size tier.
    pub fn config(self, seed: u64) -> GraphConfig {
        let num_edges = match self {
            SizeTier::Small => 8,
            SizeTier::Medium => 12,
            SizeTier::Large => 16,
        };
        GraphConfig {
            seed,
            num_edges,
            allow_self_loops: false,
        }
    }

    /// Lowercase tier name, used in fixture file names and benchmark ids.
    pub fn name(self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        }
    }
}

/// Generates a random edge set from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`. Edges are
/// returned sorted.
pub fn generate_graph(config: &GraphConfig) -> Vec<Edge> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut node_count: u32 = 2;
    let mut edges: BTreeSet<Edge> = BTreeSet::from([(1, 2)]);

    while edges.len() < config.num_edges {
        let fresh = node_count + 1;
        let (source, target) = if config.allow_self_loops {
            let source = rng.gen_range(1..=fresh);
            // A fresh node may not loop onto itself: it must connect to
            // something that already exists.
            let target = if source == fresh {
                rng.gen_range(1..=node_count)
            } else {
                rng.gen_range(1..=fresh)
            };
            (source, target)
        } else {
            let source = rng.gen_range(1..=fresh);
            let target = rng.gen_range(1..=node_count);
            (source, if target >= source { target + 1 } else { target })
        };

        if edges.insert((source, target)) && (source == fresh || target == fresh) {
            node_count = fresh;
        }
    }

    edges.into_iter().collect()
}
