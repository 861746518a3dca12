//! Weakly connected components (§4.H): union-find over successor edges of
//! the event graph.

use crate::disjoint_set::DisjointSet;
use crate::event::Event;
use crate::graph::EventGraph;
use indicatif::ProgressBar;

const LOG_CHUNK_FLOOR: usize = 10_000;

/// Each weakly connected component's member events, in `topo` order.
/// Singleton components are dropped unless `singletons` is true.
pub fn weakly_connected_components(
    graph: &EventGraph,
    singletons: bool,
    progress: Option<&ProgressBar>,
) -> Vec<Vec<Event>> {
    let topo = graph.topo();
    let n = topo.len();
    let mut ds = DisjointSet::new(n);
    let log_chunk = n / 20;

    for (i, e) in topo.iter().enumerate() {
        if log_chunk > LOG_CHUNK_FLOOR && i % log_chunk == 0 {
            log::debug!("weakly connected components: {}% processed", i * 100 / n.max(1));
        }
        if let Some(bar) = progress {
            bar.inc(1);
        }

        for s in graph.successors(e, false) {
            // Successors are strictly later in topo (§8 invariant 2), so a
            // binary search over the remainder suffices.
            if let Ok(j) = topo[i + 1..].binary_search(&s) {
                ds.union(i, i + 1 + j);
            }
        }
    }

    ds.sets(singletons)
        .into_iter()
        .map(|members| members.into_iter().map(|i| topo[i]).collect())
        .collect()
}
