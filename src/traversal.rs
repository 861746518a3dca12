//! Full out-component traversal (§4.F): exact BFS, and a deterministic
//! specialization that exploits time-ordering when `p` is `{0,1}`-valued.

use crate::counter::ExactCounter;
use crate::event::{Event, VertexId};
use crate::graph::EventGraph;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Standard FIFO BFS from `root`, following `successors`. Used for any
/// adjacency/probability model, including non-deterministic ones.
pub fn generic_out_component(
    graph: &EventGraph,
    root: &Event,
    event_hint: usize,
    node_hint: usize,
) -> ExactCounter {
    let mut counter = ExactCounter::new(graph.seed(), event_hint, node_hint);
    counter.insert(root);
    let mut queue = VecDeque::new();
    queue.push_back(*root);

    while let Some(e) = queue.pop_front() {
        for s in graph.successors(&e, false) {
            if !counter.events().contains(&s) {
                counter.insert(&s);
                queue.push_back(s);
            }
        }
    }

    counter
}

/// Single-seed SI-process out-component, valid when `graph.deterministic()`
/// is true. Scans `topo` once instead of issuing a `successors` query per
/// event, which is decisive for the largest-component search (§4.G).
pub fn deterministic_out_component(
    graph: &EventGraph,
    root: &Event,
    event_hint: usize,
    node_hint: usize,
) -> ExactCounter {
    let dt = graph.dt();
    let mut counter = ExactCounter::new(graph.seed(), event_hint, node_hint);
    counter.insert(root);

    let mut last_infected: FxHashMap<VertexId, f64> = FxHashMap::default();
    for v in root.mutated_verts() {
        last_infected.insert(v, root.effect_time());
    }
    let mut last_infect_time = root.effect_time();
    let mut in_transition: BinaryHeap<Reverse<(OrderedFloat<f64>, Event)>> = BinaryHeap::new();

    let topo = graph.topo();
    let start = topo.partition_point(|e| e <= root);

    for &e in &topo[start..] {
        while let Some(&Reverse((t, _))) = in_transition.peek() {
            if t.0 >= e.time() {
                break;
            }
            let Reverse((_, x)) = in_transition.pop().unwrap();
            for v in x.mutated_verts() {
                last_infected.insert(v, x.effect_time());
            }
            counter.insert(&x);
        }

        let infecting = e.mutator_verts().iter().any(|v| {
            last_infected.get(v).is_some_and(|&t| {
                let gap = e.time() - t;
                gap > 0.0 && gap < dt
            })
        });

        if infecting {
            if e.time() == e.effect_time() {
                counter.insert(&e);
                for v in e.mutated_verts() {
                    last_infected.insert(v, e.effect_time());
                }
            } else {
                in_transition.push(Reverse((OrderedFloat(e.effect_time()), e)));
            }
        }

        last_infect_time = last_infect_time.max(e.effect_time());
        if e.time() > last_infect_time + dt {
            break;
        }
    }

    for Reverse((_, x)) in in_transition {
        counter.insert(&x);
    }

    counter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::deterministic;

    #[test]
    fn generic_and_deterministic_agree_on_a_chain() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(3, 4, 2.0),
            Event::undirected(5, 6, 100.0),
        ];
        let g = EventGraph::new(events, 1.5, deterministic, true, 3);
        let root = g.topo()[0];
        let generic = generic_out_component(&g, &root, 16, 16);
        let spec = deterministic_out_component(&g, &root, 16, 16);
        let mut g_events: Vec<Event> = generic.events().iter().copied().collect();
        let mut s_events: Vec<Event> = spec.events().iter().copied().collect();
        g_events.sort_unstable();
        s_events.sort_unstable();
        assert_eq!(g_events, s_events);
    }

    #[test]
    fn deterministic_traversal_stops_outside_the_gap() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 100.0),
        ];
        let g = EventGraph::new(events, 1.0, deterministic, true, 3);
        let root = g.topo()[0];
        let comp = deterministic_out_component(&g, &root, 16, 16);
        assert_eq!(comp.events().len(), 1);
    }

    #[test]
    fn delayed_event_defers_application_until_effect_time() {
        let events = vec![
            Event::directed_delayed(1, 2, 0.0, 5.0),
            Event::directed_delayed(2, 3, 6.0, 0.0),
        ];
        // b.time()=6 < a.effect_time()=5 is false (6>5), so b IS reachable
        // via the queued in-transition entry landing at t=5.
        let g = EventGraph::new(events.clone(), 10.0, deterministic, true, 3);
        let root = events[0];
        let comp = deterministic_out_component(&g, &root, 16, 16);
        assert_eq!(comp.events().len(), 2);
    }
}
