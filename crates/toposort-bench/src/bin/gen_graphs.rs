//! Generates the benchmark graph fixtures to disk.
//!
//! Writes one JSON file per size tier and seed to `target/bench-fixtures/`,
//! each holding the edge list and the topology computed for it. Set
//! `RUST_LOG=debug` to see per-graph search statistics.

use std::error::Error;
use std::fs;
use std::io::BufWriter;

use serde::Serialize;
use toposort_bench::{Edge, SizeTier, fixtures_dir, generate_graph};
use toposort_core::{Topology, cyclic_toposort};
use tracing_subscriber::EnvFilter;

const SEEDS: [u64; 4] = [42, 123, 999, 7777];

#[derive(Serialize)]
struct Fixture<'a> {
    tier: &'static str,
    seed: u64,
    edges: &'a [Edge],
    topology: Topology<u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let dir = fixtures_dir();
    fs::create_dir_all(&dir)?;

    for tier in SizeTier::ALL {
        for seed in SEEDS {
            let mut config = tier.config(seed);
            config.allow_self_loops = seed % 2 == 1;
            let edges = generate_graph(&config);
            let topology = cyclic_toposort(edges.iter().copied(), None, None)?;

            let path = dir.join(format!("{}-{seed}.json", tier.name()));
            let out = fs::File::create(&path)?;
            serde_json::to_writer_pretty(
                BufWriter::new(out),
                &Fixture {
                    tier: tier.name(),
                    seed,
                    edges: &edges,
                    topology,
                },
            )?;

            tracing::info!(
                tier = tier.name(),
                seed,
                edges = edges.len(),
                path = %path.display(),
                "wrote fixture"
            );
        }
    }

    Ok(())
}
