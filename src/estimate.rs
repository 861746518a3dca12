//! Out-component size estimation (§4.E): one reverse-topological pass over
//! the event graph producing a sketch-backed counter per event, with bounded
//! live memory via in-degree reference counting.

use crate::counter::EstimateCounter;
use crate::event::{Event, VertexId};
use crate::graph::EventGraph;
use crate::sketch::hyperloglog::HyperLogLog;
use crate::sketch::Snapshot;
use indicatif::ProgressBar;
use rustc_hash::FxHashMap;

pub type EstimateSnapshot = crate::counter::Counter<Snapshot<HyperLogLog<Event>>, Snapshot<HyperLogLog<VertexId>>>;

/// Below this chunk size the original skips percentage logging entirely —
/// small runs don't need it and it would just spam the log.
const LOG_CHUNK_FLOOR: usize = 10_000;

/// `(event, counter)` pairs, one per event in `topo` unless `only_roots` is
/// set, in which case only events with no predecessor appear.
/// `event_hint`/`node_hint` size the HLL backing each counter.
pub fn estimate_out_components(
    graph: &EventGraph,
    only_roots: bool,
    event_hint: usize,
    node_hint: usize,
    progress: Option<&ProgressBar>,
) -> Vec<(Event, EstimateSnapshot)> {
    let topo = graph.topo();
    let n = topo.len();
    let log_chunk = n / 20;

    let mut live: FxHashMap<Event, EstimateCounter> = FxHashMap::default();
    let mut indeg: FxHashMap<Event, usize> = FxHashMap::default();
    let mut out = Vec::new();

    for (i, &e) in topo.iter().rev().enumerate() {
        if log_chunk > LOG_CHUNK_FLOOR && i % log_chunk == 0 {
            log::debug!("out-component estimate: {}% processed", i * 100 / n.max(1));
        }
        if let Some(bar) = progress {
            bar.inc(1);
        }

        let successors = graph.successors(&e, false);
        let preds = graph.predecessors(&e, false);
        let mut counter = EstimateCounter::new(graph.seed(), event_hint, node_hint);

        for s in &successors {
            if let Some(sketch) = live.get(s) {
                counter.merge(sketch);
            }
            if let Some(remaining) = indeg.get_mut(s) {
                *remaining -= 1;
                if *remaining == 0 {
                    if !only_roots {
                        out.push((*s, live[s].snapshot()));
                    }
                    live.remove(s);
                    indeg.remove(s);
                }
            }
        }

        counter.insert(&e);
        indeg.insert(e, preds.len());
        if preds.is_empty() {
            out.push((e, counter.snapshot()));
            indeg.remove(&e);
        } else {
            live.insert(e, counter);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Measure;
    use crate::prob::deterministic;

    #[test]
    fn chain_estimates_decrease_toward_the_tail() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(3, 4, 2.0),
        ];
        let g = EventGraph::new(events, 1.5, deterministic, true, 7);
        let estimates = estimate_out_components(&g, false, 16, 16, None);
        assert_eq!(estimates.len(), 3);
        let by_event: FxHashMap<Event, f64> = estimates
            .iter()
            .map(|(e, c)| (*e, Measure::Events.of_snapshot(c)))
            .collect();
        let first = by_event[&g.topo()[0]];
        let last = by_event[&g.topo()[2]];
        assert!(first >= last);
    }

    #[test]
    fn only_roots_emits_events_with_no_predecessor() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(5, 6, 10.0),
        ];
        let g = EventGraph::new(events, 1.5, deterministic, true, 7);
        let roots = estimate_out_components(&g, true, 16, 16, None);
        let root_events: Vec<Event> = roots.iter().map(|(e, _)| *e).collect();
        for e in &root_events {
            assert!(g.predecessors(e, false).is_empty());
        }
        // Both the chain's head and the disconnected pair's first event are roots.
        assert_eq!(root_events.len(), 2);
    }

    #[test]
    fn disconnected_events_each_see_only_themselves() {
        let events = vec![Event::undirected(1, 2, 0.0), Event::undirected(5, 6, 10.0)];
        let g = EventGraph::new(events, 0.5, deterministic, true, 1);
        let estimates = estimate_out_components(&g, false, 16, 16, None);
        for (_, c) in &estimates {
            assert_eq!(Measure::Events.of_snapshot(c).round(), 1.0);
        }
    }
}
