//! Runs the invariant checker over every size tier and a handful of seeds.
#![allow(clippy::expect_used, clippy::panic)]

use toposort_bench::correctness::check_topology;
use toposort_bench::{Edge, SizeTier, generate_graph};
use toposort_core::{cyclic_toposort, cyclic_toposort_groupings};

const SEEDS: [u64; 5] = [42, 123, 999, 7777, 54321];

fn tier_graph(tier: SizeTier, seed: u64) -> Vec<Edge> {
    let mut config = tier.config(seed);
    config.allow_self_loops = seed % 2 == 1;
    generate_graph(&config)
}

#[test]
fn small_and_medium_topologies_are_valid() {
    for tier in [SizeTier::Small, SizeTier::Medium] {
        for seed in SEEDS {
            let edges = tier_graph(tier, seed);
            let groupings =
                cyclic_toposort_groupings(edges.iter().copied(), None, None).expect("sorts");
            for topology in &groupings {
                check_topology(&edges, topology, None, None)
                    .unwrap_or_else(|err| panic!("{}/seed={seed}: {err}", tier.name()));
            }
        }
    }
}

#[test]
fn large_topology_is_valid() {
    let edges = tier_graph(SizeTier::Large, 42);
    let topology = cyclic_toposort(edges.iter().copied(), None, None).expect("sorts");
    check_topology(&edges, &topology, None, None).expect("valid");
}

#[test]
fn anchored_topologies_are_valid() {
    for seed in SEEDS {
        let edges = tier_graph(SizeTier::Medium, seed);
        let last = edges
            .iter()
            .flat_map(|&(s, t)| [s, t])
            .max()
            .expect("non-empty");
        let topology = cyclic_toposort(edges.iter().copied(), Some(1), Some(last)).expect("sorts");
        check_topology(&edges, &topology, Some(&1), Some(&last))
            .unwrap_or_else(|err| panic!("seed={seed}: {err}"));
    }
}

#[test]
fn generated_topology_round_trips_through_json() {
    let edges = tier_graph(SizeTier::Small, 42);
    let topology = cyclic_toposort(edges.iter().copied(), None, None).expect("sorts");
    let json = serde_json::to_string(&topology).expect("serialize");
    let back: toposort_core::Topology<u32> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, topology);
}
