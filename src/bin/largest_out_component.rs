//! `largest-out-component`: finds and dumps the single largest out-component
//! in a temporal network.

use anyhow::Context;
use clap::Parser;
use event_graph::cli::LargestOutComponentArgs;
use event_graph::counter::Measure;
use event_graph::estimate::estimate_out_components;
use event_graph::graph::EventGraph;
use event_graph::io::read_events;
use event_graph::progress::sweep_bar;
use event_graph::report::{write_summary, Summary};
use event_graph::search::largest_out_component;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = LargestOutComponentArgs::parse();

    let file = File::open(&args.network)
        .with_context(|| format!("opening network file {:?}", args.network))?;
    let events = read_events(BufReader::new(file), args.edge_kind.into(), args.temporal_reserve)?;
    let event_count = events.len();
    let node_count = {
        let mut node_ids = rustc_hash::FxHashSet::default();
        for e in &events {
            for v in e.mutator_verts().iter().chain(e.mutated_verts().iter()) {
                node_ids.insert(*v);
            }
        }
        node_ids.len()
    };

    let graph = EventGraph::new(
        events,
        args.dt,
        args.prob_dist.prob_fn(),
        args.prob_dist.is_deterministic(),
        args.seed,
    );

    let bar = sweep_bar(graph.topo().len());
    let estimates = estimate_out_components(&graph, true, 64, 64, Some(&bar));
    bar.finish_and_clear();

    let measure: Measure = args.size_measure.into();
    let max_size = match measure {
        Measure::Events => event_count as f64,
        Measure::Nodes => node_count as f64,
    };
    let winner = largest_out_component(&graph, &estimates, measure, args.significance, max_size)
        .context("network has no events")?;

    if let Some(path) = &args.largest_out_component {
        let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
        let mut w = BufWriter::new(f);
        for e in winner.component.events().iter() {
            writeln!(w, "{} {}", e.time(), e.effect_time())?;
        }
    }

    if let Some(path) = &args.summary {
        let (event_size, node_size) = match measure {
            Measure::Events => (Some(winner.size), None),
            Measure::Nodes => (None, Some(winner.size)),
        };
        let summary = Summary {
            seed: args.seed,
            temporal_vertices: winner.component.nodes().len(),
            temporal_edges: graph.topo().len(),
            time_window: winner.component.time_window(),
            largest_out_event: Some(winner.event),
            largest_out_event_size: event_size,
            largest_out_node_size: node_size,
            largest_out_lifetime: Some(winner.component.lifetime()),
            largest_weakly_event_count: None,
            largest_weakly_node_count: None,
            largest_weakly_lifetime: None,
        };
        let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
        write_summary(BufWriter::new(f), &summary)?;
    }

    Ok(())
}
