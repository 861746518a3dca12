//! Temporal edges: the vertices of the event graph.
//!
//! An [`Event`] is one interaction between one or two nodes at a point in
//! time. The graph never mixes variants in practice (a run picks one edge
//! kind up front, mirroring the original's compile-time `EdgeT` template
//! parameter), but a single sum type keeps adjacency, ordering and hashing
//! dispatch in one place instead of three near-identical generic instantiations.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// Node identifier. Temporal networks in practice key nodes by small
/// integers assigned at load time, not by name.
pub type VertexId = u64;

/// A timestamp or time delta. `f64` covers both the integer and
/// floating-point time scales the original supports.
pub type Time = f64;

/// Endpoint list for a single event. Two elements covers every variant
/// without a heap allocation; only undirected events use both slots.
pub type Verts = SmallVec<[VertexId; 2]>;

/// A timestamped temporal edge.
///
/// Derived `Ord`/`PartialOrd` compare the variant discriminant first (in
/// declaration order — irrelevant in practice, since a single graph never
/// mixes variants), then fields in declaration order within a variant.
/// `time` is declared first in every variant so this total order is
/// time-primary: `topo` (§3) ends up sorted chronologically, which the
/// deterministic traversal (§4.F) scans forward relying on exactly that.
/// `OrderedFloat` gives `f64` fields a total order and makes `Eq`/`Hash`
/// sound, which plain `f64` cannot provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Event {
    /// An undirected interaction between `v1` and `v2` at `time`. `v1 <=
    /// v2` always holds (enforced by [`Event::undirected`]) so that the two
    /// orderings of the same pair compare and hash identically.
    Undirected {
        time: OrderedFloat<Time>,
        v1: VertexId,
        v2: VertexId,
    },
    /// A directed interaction `tail -> head` at `time`.
    Directed {
        time: OrderedFloat<Time>,
        tail: VertexId,
        head: VertexId,
    },
    /// A directed interaction sent at `time` and taking effect at `time +
    /// delay`.
    DirectedDelayed {
        time: OrderedFloat<Time>,
        delay: OrderedFloat<Time>,
        tail: VertexId,
        head: VertexId,
    },
}

impl Event {
    /// Undirected edge `{v1, v2}` at `time`. Self-loops (`v1 == v2`) are
    /// accepted here; the event-list reader is responsible for dropping
    /// them at load, per spec.md §3.
    pub fn undirected(v1: VertexId, v2: VertexId, time: Time) -> Self {
        let (v1, v2) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
        Event::Undirected {
            time: OrderedFloat(time),
            v1,
            v2,
        }
    }

    /// Directed edge `tail -> head` at `time`.
    pub fn directed(tail: VertexId, head: VertexId, time: Time) -> Self {
        Event::Directed {
            time: OrderedFloat(time),
            tail,
            head,
        }
    }

    /// Directed edge `tail -> head` sent at `time`, delivered `delay` later.
    pub fn directed_delayed(tail: VertexId, head: VertexId, time: Time, delay: Time) -> Self {
        debug_assert!(delay >= 0.0, "delay must be non-negative");
        Event::DirectedDelayed {
            time: OrderedFloat(time),
            delay: OrderedFloat(delay),
            tail,
            head,
        }
    }

    /// The send/occurrence time.
    pub fn time(&self) -> Time {
        match *self {
            Event::Undirected { time, .. } => time.0,
            Event::Directed { time, .. } => time.0,
            Event::DirectedDelayed { time, .. } => time.0,
        }
    }

    /// When this event's mutation actually lands: `time()` for everything
    /// but `DirectedDelayed`, which lands at `time() + delay()`.
    pub fn effect_time(&self) -> Time {
        match *self {
            Event::DirectedDelayed { time, delay, .. } => time.0 + delay.0,
            other => other.time(),
        }
    }

    /// Delay, or `0` for variants without one.
    pub fn delay(&self) -> Time {
        match *self {
            Event::DirectedDelayed { delay, .. } => delay.0,
            _ => 0.0,
        }
    }

    /// Endpoints that cause this event (the "sending" side).
    pub fn mutator_verts(&self) -> Verts {
        match *self {
            Event::Undirected { v1, v2, .. } => Verts::from_slice(&[v1, v2]),
            Event::Directed { tail, .. } | Event::DirectedDelayed { tail, .. } => {
                Verts::from_slice(&[tail])
            }
        }
    }

    /// Endpoints affected by this event (the "receiving" side).
    pub fn mutated_verts(&self) -> Verts {
        match *self {
            Event::Undirected { v1, v2, .. } => Verts::from_slice(&[v1, v2]),
            Event::Directed { head, .. } | Event::DirectedDelayed { head, .. } => {
                Verts::from_slice(&[head])
            }
        }
    }

    /// `true` for the variant the deterministic out-component shortcut
    /// (spec.md §4.D, §4.F) is specialized for.
    pub fn is_undirected(&self) -> bool {
        matches!(self, Event::Undirected { .. })
    }
}

/// Can `a` logically cause `b`? spec.md §3.
pub fn adjacent(a: &Event, b: &Event) -> bool {
    match (a, b) {
        (Event::Undirected { v1: a1, v2: a2, .. }, Event::Undirected { v1: b1, v2: b2, .. }) => {
            b.time() > a.time() && (a1 == b1 || a1 == b2 || a2 == b1 || a2 == b2)
        }
        (Event::Directed { head, .. }, Event::Directed { tail, .. }) => {
            b.time() > a.time() && head == tail
        }
        (Event::DirectedDelayed { head, .. }, Event::DirectedDelayed { tail, .. }) => {
            b.time() > a.effect_time() && head == tail
        }
        _ => panic!("adjacent() called across mismatched event variants"),
    }
}
