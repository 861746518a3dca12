//! Reachability counter (§4.C): a pair of cardinality sketches over visited
//! events and visited nodes, plus observed time bounds.

use crate::event::{Event, VertexId};
use crate::sketch::{CardinalitySketch, ExactSet, HyperLogLog, Snapshot};

#[derive(Clone, Debug)]
pub struct Counter<Ev, Nd> {
    events: Ev,
    nodes: Nd,
    t_min: f64,
    t_max: f64,
}

/// The estimator sweep's working counter: probabilistic sketches over both
/// axes, sized from the caller's expected event/node counts.
pub type EstimateCounter = Counter<HyperLogLog<Event>, HyperLogLog<VertexId>>;

/// The full-traversal counter: exact sets, so membership queries during BFS
/// (§4.F) are meaningful, not just the cardinality.
pub type ExactCounter = Counter<ExactSet<Event>, ExactSet<VertexId>>;

impl<Ev, Nd> Counter<Ev, Nd>
where
    Ev: CardinalitySketch<Item = Event>,
    Nd: CardinalitySketch<Item = VertexId>,
{
    pub fn new(seed: u64, event_hint: usize, node_hint: usize) -> Self {
        Counter {
            events: Ev::new(seed, event_hint),
            nodes: Nd::new(seed, node_hint),
            t_min: f64::INFINITY,
            t_max: f64::NEG_INFINITY,
        }
    }

    /// Insert `event`: both sketches and the time window are updated from
    /// its mutator/mutated endpoints.
    pub fn insert(&mut self, event: &Event) {
        self.events.insert(event);
        for v in event.mutator_verts().iter().chain(event.mutated_verts().iter()) {
            self.nodes.insert(v);
        }
        let t = event.time();
        self.t_min = self.t_min.min(t);
        self.t_max = self.t_max.max(t);
    }

    pub fn merge(&mut self, other: &Self) {
        self.events.merge(&other.events);
        self.nodes.merge(&other.nodes);
        self.t_min = self.t_min.min(other.t_min);
        self.t_max = self.t_max.max(other.t_max);
    }

    pub fn event_estimate(&self) -> f64 {
        self.events.estimate()
    }

    pub fn node_estimate(&self) -> f64 {
        self.nodes.estimate()
    }

    /// `t_max - t_min`, or `0` if nothing was ever inserted.
    pub fn lifetime(&self) -> f64 {
        if self.t_max < self.t_min {
            0.0
        } else {
            self.t_max - self.t_min
        }
    }

    pub fn time_window(&self) -> (f64, f64) {
        if self.t_max < self.t_min {
            (0.0, 0.0)
        } else {
            (self.t_min, self.t_max)
        }
    }

    pub fn events(&self) -> &Ev {
        &self.events
    }

    pub fn nodes(&self) -> &Nd {
        &self.nodes
    }

    /// A read-only view that forbids further inserts (§4.E "Snapshots").
    pub fn snapshot(&self) -> Counter<Snapshot<Ev>, Snapshot<Nd>> {
        Counter {
            events: Snapshot::new(self.events.clone()),
            nodes: Snapshot::new(self.nodes.clone()),
            t_min: self.t_min,
            t_max: self.t_max,
        }
    }
}

impl<Ev, Nd> Counter<Snapshot<Ev>, Snapshot<Nd>>
where
    Ev: CardinalitySketch,
    Nd: CardinalitySketch,
{
    pub fn event_estimate(&self) -> f64 {
        self.events.estimate()
    }

    pub fn node_estimate(&self) -> f64 {
        self.nodes.estimate()
    }

    pub fn lifetime(&self) -> f64 {
        if self.t_max < self.t_min {
            0.0
        } else {
            self.t_max - self.t_min
        }
    }

    pub fn time_window(&self) -> (f64, f64) {
        if self.t_max < self.t_min {
            (0.0, 0.0)
        } else {
            (self.t_min, self.t_max)
        }
    }

    pub fn events(&self) -> &Snapshot<Ev> {
        &self.events
    }

    pub fn nodes(&self) -> &Snapshot<Nd> {
        &self.nodes
    }
}

/// A measure selects which sketch's estimate a candidate is ranked/compared
/// by (§4.G, §10.2's `--size-measure`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
    Events,
    Nodes,
}

impl Measure {
    pub fn of<Ev, Nd>(self, counter: &Counter<Ev, Nd>) -> f64
    where
        Ev: CardinalitySketch<Item = Event>,
        Nd: CardinalitySketch<Item = VertexId>,
    {
        match self {
            Measure::Events => counter.event_estimate(),
            Measure::Nodes => counter.node_estimate(),
        }
    }

    pub fn of_snapshot<Ev, Nd>(self, counter: &Counter<Snapshot<Ev>, Snapshot<Nd>>) -> f64
    where
        Ev: CardinalitySketch,
        Nd: CardinalitySketch,
    {
        match self {
            Measure::Events => counter.event_estimate(),
            Measure::Nodes => counter.node_estimate(),
        }
    }
}
