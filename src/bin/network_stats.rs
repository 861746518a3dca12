//! `network-stats`: out-component-size estimates and weakly-connected-
//! component summaries over a temporal network.

use anyhow::Context;
use clap::Parser;
use event_graph::cli::NetworkStatsArgs;
use event_graph::counter::Measure;
use event_graph::estimate::estimate_out_components;
use event_graph::graph::EventGraph;
use event_graph::io::read_events;
use event_graph::progress::sweep_bar;
use event_graph::report::{write_out_component_sizes, write_summary, write_weakly_component_sizes, Summary};
use event_graph::wcc::weakly_connected_components;
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = NetworkStatsArgs::parse();

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

    let need_weakly = args.summary.is_some() || args.weakly_component_sizes.is_some();
    let components = if need_weakly {
        let wcc_bar = sweep_bar(graph.topo().len());
        let c = weakly_connected_components(&graph, true, Some(&wcc_bar));
        wcc_bar.finish_and_clear();
        Some(c)
    } else {
        None
    };

    if let Some(path) = &args.weakly_component_sizes {
        let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
        write_weakly_component_sizes(BufWriter::new(f), components.as_deref().unwrap_or(&[]))?;
    }

    let bar = sweep_bar(graph.topo().len());
    let estimates = estimate_out_components(&graph, false, 64, 64, Some(&bar));
    bar.finish_and_clear();

    if let Some(path) = &args.out_component_sizes {
        let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
        write_out_component_sizes(BufWriter::new(f), estimates.iter())?;
    }

    if let Some(path) = &args.summary {
        let mut node_ids = rustc_hash::FxHashSet::default();
        for e in graph.topo() {
            for v in e.mutator_verts().iter().chain(e.mutated_verts().iter()) {
                node_ids.insert(*v);
            }
        }

        // A cheap linear scan over the raw (untraversed) per-event estimates,
        // not the exact §4.G search: network-stats reports the sketch's own
        // maxima, it never runs the pruning search.
        let mut largest_out_event_size = f64::MIN;
        let mut largest_out_node_size = f64::MIN;
        let mut largest_out_lifetime = f64::MIN;
        let mut largest_out_lifetime_event = None;
        for (e, snapshot) in &estimates {
            largest_out_event_size = largest_out_event_size.max(Measure::Events.of_snapshot(snapshot));
            largest_out_node_size = largest_out_node_size.max(Measure::Nodes.of_snapshot(snapshot));
            let lt = snapshot.lifetime();
            if lt > largest_out_lifetime {
                largest_out_lifetime = lt;
                largest_out_lifetime_event = Some(*e);
            }
        }

        let mut largest_weakly_event_count = 0usize;
        let mut largest_weakly_node_count = 0usize;
        let mut largest_weakly_lifetime = f64::MIN;
        for members in components.as_deref().unwrap_or(&[]) {
            let mut nodes = rustc_hash::FxHashSet::default();
            let mut t_min = f64::INFINITY;
            let mut t_max = f64::NEG_INFINITY;
            for e in members {
                for v in e.mutator_verts().iter().chain(e.mutated_verts().iter()) {
                    nodes.insert(*v);
                }
                t_min = t_min.min(e.time());
                t_max = t_max.max(e.time());
            }
            largest_weakly_event_count = largest_weakly_event_count.max(members.len());
            largest_weakly_node_count = largest_weakly_node_count.max(nodes.len());
            largest_weakly_lifetime = largest_weakly_lifetime.max(t_max - t_min);
        }

        let summary = Summary {
            seed: args.seed,
            temporal_vertices: node_ids.len(),
            temporal_edges: graph.topo().len(),
            time_window: graph
                .topo()
                .first()
                .map(|_| (graph.topo()[0].time(), graph.topo()[graph.topo().len() - 1].time()))
                .unwrap_or((0.0, 0.0)),
            largest_out_event: largest_out_lifetime_event,
            largest_out_event_size: (!estimates.is_empty()).then_some(largest_out_event_size),
            largest_out_node_size: (!estimates.is_empty()).then_some(largest_out_node_size),
            largest_out_lifetime: (!estimates.is_empty()).then_some(largest_out_lifetime.max(0.0)),
            largest_weakly_event_count: components.as_ref().filter(|c| !c.is_empty()).map(|_| largest_weakly_event_count),
            largest_weakly_node_count: components.as_ref().filter(|c| !c.is_empty()).map(|_| largest_weakly_node_count),
            largest_weakly_lifetime: components.as_ref().filter(|c| !c.is_empty()).map(|_| largest_weakly_lifetime),
        };
        let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
        write_summary(BufWriter::new(f), &summary)?;
    }

    Ok(())
}
