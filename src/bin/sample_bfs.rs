//! `sample-bfs`: times full out-component traversal over a random sample of
//! roots, extrapolated to the whole network — a quick sanity check on how
//! expensive an exhaustive traversal would be.

use anyhow::Context;
use clap::Parser;
use event_graph::cli::SampleBfsArgs;
use event_graph::graph::EventGraph;
use event_graph::io::read_events;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = SampleBfsArgs::parse();

    let file = File::open(&args.network)
        .with_context(|| format!("opening network file {:?}", args.network))?;
    let events = read_events(BufReader::new(file), args.edge_kind.into(), args.temporal_reserve)?;

    let graph = EventGraph::new(
        events,
        args.dt,
        args.prob_dist.prob_fn(),
        args.prob_dist.is_deterministic(),
        args.seed,
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let roots: Vec<_> = graph
        .topo()
        .choose_multiple(&mut rng, args.sample_size.min(graph.topo().len()))
        .copied()
        .collect();

    let start = Instant::now();
    for root in &roots {
        let _ = if graph.deterministic() {
            event_graph::traversal::deterministic_out_component(&graph, root, 0, 0)
        } else {
            event_graph::traversal::generic_out_component(&graph, root, 0, 0)
        };
    }
    let elapsed = start.elapsed();

    let extrapolated_ms = if roots.is_empty() {
        0.0
    } else {
        elapsed.as_secs_f64() * 1000.0 / roots.len() as f64 * graph.topo().len() as f64
    };

    if let Some(path) = &args.summary {
        let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
        let mut w = BufWriter::new(f);
        use std::io::Write as _;
        writeln!(w, "dt: {}", args.dt)?;
        writeln!(w, "sample-size: {}", roots.len())?;
        writeln!(w, "temporal-vertices: {}", node_count(&graph))?;
        writeln!(w, "temporal-edges: {}", graph.topo().len())?;
        writeln!(w, "out-component-time: {extrapolated_ms}")?;
    }

    Ok(())
}

fn node_count(graph: &EventGraph) -> usize {
    let mut nodes = rustc_hash::FxHashSet::default();
    for e in graph.topo() {
        for v in e.mutator_verts().iter().chain(e.mutated_verts().iter()) {
            nodes.insert(*v);
        }
    }
    nodes.len()
}
