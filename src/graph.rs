//! Event graph index (§4.D): per-node ordered incidence lists plus
//! adjacency enumeration over a fixed, immutable set of temporal edges.

use crate::event::{adjacent, Event, VertexId};
use crate::hashutil::mix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

/// A `p(a,b,Δ)` adjacency probability function; see [`crate::prob`].
pub type ProbFn = fn(&Event, &Event, f64) -> f64;

/// The immutable event graph (§3). Built once from an event list and a
/// probability function; every query is a pure function of `(self, args)`.
pub struct EventGraph {
    topo: Vec<Event>,
    out_idx: FxHashMap<VertexId, Vec<Event>>,
    in_idx: FxHashMap<VertexId, Vec<Event>>,
    dt: f64,
    prob: ProbFn,
    deterministic: bool,
    seed: u64,
}

/// Below this, the Bernoulli weight is treated as zero and the scan stops
/// (§4.D "Random model").
const PROB_FLOOR: f64 = 1e-20;

fn event_hash(e: &Event) -> u64 {
    let mut hasher = FxHasher::default();
    e.hash(&mut hasher);
    hasher.finish()
}

impl EventGraph {
    /// Build the graph from `events`. `dt` is the expected/maximum time gap
    /// Δ passed to `prob`; `deterministic` records whether `prob` is
    /// `{0,1}`-valued (enabling the §4.F shortcut); `seed` drives the
    /// hash-stable Bernoulli trials. (Open Question (a): this parameter
    /// order is the canonical one.)
    pub fn new(events: Vec<Event>, dt: f64, prob: ProbFn, deterministic: bool, seed: u64) -> Self {
        let mut topo = events;
        topo.sort_unstable();
        topo.dedup();

        let mut out_idx: FxHashMap<VertexId, Vec<Event>> = FxHashMap::default();
        let mut in_idx: FxHashMap<VertexId, Vec<Event>> = FxHashMap::default();
        for &e in &topo {
            for v in e.mutator_verts() {
                out_idx.entry(v).or_default().push(e);
            }
            for v in e.mutated_verts() {
                in_idx.entry(v).or_default().push(e);
            }
        }
        for list in out_idx.values_mut() {
            list.sort_unstable_by(|a, b| a.time().partial_cmp(&b.time()).unwrap().then(a.cmp(b)));
            list.dedup();
        }
        for list in in_idx.values_mut() {
            list.sort_unstable_by(|a, b| {
                a.effect_time().partial_cmp(&b.effect_time()).unwrap().then(a.cmp(b))
            });
            list.dedup();
        }

        EventGraph {
            topo,
            out_idx,
            in_idx,
            dt,
            prob,
            deterministic,
            seed,
        }
    }

    pub fn topo(&self) -> &[Event] {
        &self.topo
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn prob(&self, a: &Event, b: &Event) -> f64 {
        (self.prob)(a, b, self.dt)
    }

    /// Hash-stable Bernoulli trial for the ordered pair `(a, b)` at weight
    /// `q` — a pure function of `(self.seed, a, b, q)` (§4.D "Random model").
    fn bernoulli_trial(&self, a: &Event, b: &Event, q: f64) -> bool {
        let acc = mix(mix(self.seed, event_hash(a)), event_hash(b));
        let mut rng = ChaCha8Rng::seed_from_u64(acc);
        rng.random_bool(q.clamp(0.0, 1.0))
    }

    /// Events `s` with `adj(e,s)` sampled by `p`, in strictly increasing
    /// `(time, event)` order. With `just_first`, only ties at the earliest
    /// included successor time are returned (§4.D).
    pub fn successors(&self, e: &Event, just_first: bool) -> Vec<Event> {
        let mut per_v = Vec::new();
        for v in e.mutated_verts() {
            per_v.push(self.scan_forward(v, e, just_first));
        }
        merge_dedup(per_v)
    }

    /// Events `c` with `adj(c,e)` sampled by `p`, scanned backward from just
    /// before `e` in `(effect_time, event)` order.
    pub fn predecessors(&self, e: &Event, just_first: bool) -> Vec<Event> {
        let mut per_v = Vec::new();
        for v in e.mutator_verts() {
            per_v.push(self.scan_backward(v, e, just_first));
        }
        merge_dedup(per_v)
    }

    fn scan_forward(&self, v: VertexId, e: &Event, just_first: bool) -> Vec<Event> {
        let Some(list) = self.out_idx.get(&v) else {
            return Vec::new();
        };
        let start = list.partition_point(|c| (c.time(), *c) < (e.time(), *e));
        let mut out = Vec::new();
        let mut first_time: Option<f64> = None;
        for c in &list[start..] {
            if !adjacent(e, c) {
                continue;
            }
            if just_first {
                if let Some(t) = first_time {
                    if c.time() != t {
                        break;
                    }
                }
            }
            let q = self.prob(e, c);
            if q <= PROB_FLOOR {
                break;
            }
            if self.bernoulli_trial(e, c, q) {
                if first_time.is_none() {
                    first_time = Some(c.time());
                }
                out.push(*c);
            }
        }
        out
    }

    fn scan_backward(&self, v: VertexId, e: &Event, just_first: bool) -> Vec<Event> {
        let Some(list) = self.in_idx.get(&v) else {
            return Vec::new();
        };
        let start = list.partition_point(|c| (c.effect_time(), *c) < (e.effect_time(), *e));
        let mut out = Vec::new();
        let mut first_time: Option<f64> = None;
        for c in list[..start].iter().rev() {
            if !adjacent(c, e) {
                continue;
            }
            if just_first {
                if let Some(t) = first_time {
                    if c.time() != t {
                        break;
                    }
                }
            }
            let q = self.prob(c, e);
            if q <= PROB_FLOOR {
                break;
            }
            if self.bernoulli_trial(c, e, q) {
                if first_time.is_none() {
                    first_time = Some(c.time());
                }
                out.push(*c);
            }
        }
        out
    }

    /// Drop every occurrence of an event in `to_remove` from all incidence
    /// lists. `topo` itself is untouched (§4.D).
    pub fn remove_events(&mut self, to_remove: &rustc_hash::FxHashSet<Event>) {
        for list in self.out_idx.values_mut() {
            list.retain(|e| !to_remove.contains(e));
        }
        for list in self.in_idx.values_mut() {
            list.retain(|e| !to_remove.contains(e));
        }
    }
}

/// Each sublist is individually sorted (by construction above); concatenate
/// and dedup rather than hand-roll a k-way merge, since a node has at most
/// two incident endpoints per event (§3) and this runs once per query.
fn merge_dedup(per_v: Vec<Vec<Event>>) -> Vec<Event> {
    let mut all: Vec<Event> = per_v.into_iter().flatten().collect();
    all.sort_unstable();
    all.dedup();
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::deterministic;

    fn chain_graph() -> EventGraph {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(3, 4, 2.0),
        ];
        EventGraph::new(events, 1.5, deterministic, true, 42)
    }

    #[test]
    fn successors_are_sorted_and_adjacent() {
        let g = chain_graph();
        let e0 = g.topo()[0];
        let succ = g.successors(&e0, false);
        assert!(succ.iter().all(|s| adjacent(&e0, s)));
        let mut sorted = succ.clone();
        sorted.sort_unstable();
        assert_eq!(succ, sorted);
    }

    #[test]
    fn purity_of_repeated_queries() {
        let g = chain_graph();
        let e0 = g.topo()[0];
        assert_eq!(g.successors(&e0, false), g.successors(&e0, false));
        assert_eq!(g.predecessors(&g.topo()[2], false), g.predecessors(&g.topo()[2], false));
    }

    #[test]
    fn successor_and_predecessor_views_agree() {
        let g = chain_graph();
        for e in g.topo() {
            for s in g.successors(e, false) {
                assert!(g.predecessors(&s, false).contains(e));
            }
        }
    }

    #[test]
    fn just_first_keeps_only_earliest_time_ties() {
        let events = vec![
            Event::undirected(1, 2, 0.0),
            Event::undirected(2, 3, 1.0),
            Event::undirected(2, 4, 1.0),
            Event::undirected(2, 5, 2.0),
        ];
        let g = EventGraph::new(events, 5.0, deterministic, true, 1);
        let e0 = g.topo()[0];
        let first_only = g.successors(&e0, true);
        assert!(first_only.iter().all(|s| s.time() == 1.0));
        assert!(!first_only.is_empty());
    }

    #[test]
    fn remove_events_drops_from_indices_only() {
        let mut g = chain_graph();
        let victim = g.topo()[1];
        let mut set = rustc_hash::FxHashSet::default();
        set.insert(victim);
        g.remove_events(&set);
        assert_eq!(g.topo().len(), 3);
        assert!(!g.successors(&g.topo()[0], false).contains(&victim));
    }
}
