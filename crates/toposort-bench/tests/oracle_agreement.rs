//! Compares `cyclic_toposort_groupings` against the brute-force oracle on
//! seeded random graphs of up to 16 edges, small enough to enumerate every
//! edge subset.
#![allow(clippy::expect_used)]

use proptest::prelude::*;
use toposort_bench::{
    Edge, GraphConfig, OracleGrouping, SizeTier, bruteforce_feedback_sets, bruteforce_groupings,
    generate_graph,
};
use toposort_core::{cyclic_toposort, cyclic_toposort_groupings};

fn core_groupings(edges: &[Edge], start: Option<u32>, end: Option<u32>) -> Vec<OracleGrouping> {
    let mut groupings: Vec<OracleGrouping> =
        cyclic_toposort_groupings(edges.iter().copied(), start, end)
            .expect("sorts")
            .into_iter()
            .map(|topology| OracleGrouping {
                level_count: topology.level_count(),
                feedback_edges: topology.feedback_edges,
            })
            .collect();
    groupings.sort();
    groupings
}

fn graph(seed: u64, num_edges: usize, allow_self_loops: bool) -> Vec<Edge> {
    generate_graph(&GraphConfig {
        seed,
        num_edges,
        allow_self_loops,
    })
}

#[test]
fn groupings_match_oracle_on_random_graphs() {
    for seed in 0..60 {
        let num_edges = 1 + (seed as usize % 12);
        let edges = graph(seed, num_edges, seed % 3 == 0);
        assert_eq!(
            core_groupings(&edges, None, None),
            bruteforce_groupings(&edges, None, None),
            "seed={seed} edges={edges:?}"
        );
    }
}

#[test]
fn feedback_size_is_minimal() {
    for seed in 100..140 {
        let edges = graph(seed, 12, false);
        let minimum = bruteforce_feedback_sets(&edges, None, None)
            .first()
            .map(|set| set.len())
            .expect("some set breaks every cycle");
        let topology = cyclic_toposort(edges.iter().copied(), None, None).expect("sorts");
        assert_eq!(topology.feedback_edges.len(), minimum, "seed={seed}");
    }
}

#[test]
fn large_tier_groupings_match_oracle() {
    for seed in 0..20 {
        let mut config = SizeTier::Large.config(seed);
        config.allow_self_loops = seed % 4 == 0;
        let edges = generate_graph(&config);
        assert_eq!(
            core_groupings(&edges, None, None),
            bruteforce_groupings(&edges, None, None),
            "seed={seed} edges={edges:?}"
        );
    }
}

#[test]
fn anchored_groupings_match_oracle() {
    for seed in 200..230 {
        let edges = graph(seed, 10, seed % 2 == 0);
        let last = edges
            .iter()
            .flat_map(|&(s, t)| [s, t])
            .max()
            .expect("non-empty");
        for (start, end) in [(Some(1), None), (None, Some(last)), (Some(2), Some(1))] {
            assert_eq!(
                core_groupings(&edges, start, end),
                bruteforce_groupings(&edges, start, end),
                "seed={seed} start={start:?} end={end:?}"
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn oracle_agrees_for_any_seed(
        seed in any::<u64>(),
        num_edges in 1usize..=10,
        allow_self_loops in any::<bool>(),
    ) {
        let edges = graph(seed, num_edges, allow_self_loops);
        prop_assert_eq!(
            core_groupings(&edges, None, None),
            bruteforce_groupings(&edges, None, None)
        );
    }
}
