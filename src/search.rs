//! Largest-out-component search (§4.G): statistical pruning over sketch
//! estimates, then exact traversal of the surviving candidates only.

use crate::counter::{ExactCounter, Measure};
use crate::estimate::EstimateSnapshot;
use crate::event::Event;
use crate::graph::EventGraph;
use crate::traversal::{deterministic_out_component, generic_out_component};

/// The winning event, its exact out-component, and the measure it was
/// ranked by.
pub struct LargestOutComponent {
    pub event: Event,
    pub component: ExactCounter,
    pub size: f64,
}

fn exact_component(graph: &EventGraph, root: &Event, event_hint: usize, node_hint: usize) -> ExactCounter {
    if graph.deterministic() {
        deterministic_out_component(graph, root, event_hint, node_hint)
    } else {
        generic_out_component(graph, root, event_hint, node_hint)
    }
}

/// Statistical pruning + exact traversal (§4.G steps 1-5).
///
/// `estimates` need not be sorted; this function sorts its own copy. `alpha`
/// is the significance level (in `(0, 1]`): candidates are scanned in
/// descending estimate order, accumulating `log(1 - P(...))`, until the sum
/// drops to `log(alpha)` or below — beyond that point no unscanned event's
/// true size can plausibly exceed the best one found so far.
pub fn largest_out_component(
    graph: &EventGraph,
    estimates: &[(Event, EstimateSnapshot)],
    measure: Measure,
    alpha: f64,
    max_size: f64,
) -> Option<LargestOutComponent> {
    if estimates.is_empty() {
        return None;
    }
    let mut sorted: Vec<&(Event, EstimateSnapshot)> = estimates.iter().collect();
    sorted.sort_by(|a, b| {
        measure
            .of_snapshot(&b.1)
            .partial_cmp(&measure.of_snapshot(&a.1))
            .unwrap()
    });

    let event_hint = (measure.of_snapshot(&sorted[0].1) * 1.05).max(16.0) as usize;
    let first_exact = exact_component(graph, &sorted[0].0, event_hint, event_hint);
    let mut loc_size = match measure {
        Measure::Events => Measure::Events.of(&first_exact),
        Measure::Nodes => Measure::Nodes.of(&first_exact),
    };
    let mut best = LargestOutComponent {
        event: sorted[0].0,
        component: first_exact,
        size: loc_size,
    };

    let log_alpha = alpha.ln();
    let mut log_prob_ok = 0.0f64;

    for &(event, ref snapshot) in sorted.iter().skip(1) {
        let candidate_est = measure.of_snapshot(snapshot);
        let p = snapshot_p_larger(snapshot, measure, loc_size, max_size);
        log_prob_ok += (1.0 - p).max(f64::MIN_POSITIVE).ln();
        if log_prob_ok <= log_alpha {
            break;
        }

        let hint = (candidate_est * 1.05).max(16.0) as usize;
        let exact = exact_component(graph, event, hint, hint);
        let exact_size = match measure {
            Measure::Events => Measure::Events.of(&exact),
            Measure::Nodes => Measure::Nodes.of(&exact),
        };
        if exact_size > best.size {
            loc_size = exact_size;
            best = LargestOutComponent {
                event: *event,
                component: exact,
                size: exact_size,
            };
        }
    }

    Some(best)
}

fn snapshot_p_larger(snapshot: &EstimateSnapshot, measure: Measure, threshold: f64, max_size: f64) -> f64 {
    match measure {
        Measure::Events => {
            let est = snapshot.events().estimate();
            snapshot.events().p_larger(threshold, est, max_size)
        }
        Measure::Nodes => {
            let est = snapshot.nodes().estimate();
            snapshot.nodes().p_larger(threshold, est, max_size)
        }
    }
}

/// The "longest-lifetime" variant (§4.G): the event whose counter's
/// lifetime `t_max - t_min` is maximal, traversed once.
pub fn longest_lifetime_component(
    graph: &EventGraph,
    estimates: &[(Event, EstimateSnapshot)],
) -> Option<LargestOutComponent> {
    let (event, snapshot) = estimates
        .iter()
        .max_by(|a, b| a.1.lifetime().partial_cmp(&b.1.lifetime()).unwrap())?;
    let hint = (snapshot.event_estimate() * 1.05).max(16.0) as usize;
    let component = exact_component(graph, event, hint, hint);
    let size = Measure::Events.of(&component);
    Some(LargestOutComponent {
        event: *event,
        component,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimate_out_components;
    use crate::prob::deterministic;

    #[test]
    fn finds_the_earliest_event_in_a_chain_as_largest() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(3, 4, 2.0),
            Event::undirected(4, 5, 3.0),
        ];
        let g = EventGraph::new(events, 1.5, deterministic, true, 11);
        let estimates = estimate_out_components(&g, false, 16, 16, None);
        let result = largest_out_component(&g, &estimates, Measure::Events, 0.001, 1000.0).unwrap();
        assert_eq!(result.event, g.topo()[0]);
        assert_eq!(result.size, 4.0);
    }

    #[test]
    fn longest_lifetime_picks_widest_window() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(3, 4, 2.0),
            Event::undirected(10, 11, 50.0),
        ];
        let g = EventGraph::new(events, 1.5, deterministic, true, 11);
        let estimates = estimate_out_components(&g, false, 16, 16, None);
        let result = longest_lifetime_component(&g, &estimates).unwrap();
        assert_eq!(result.event, g.topo()[0]);
    }
}
