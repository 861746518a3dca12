//! Merge laws and self-inclusion (§8 "Laws") exercised against both sketch
//! backends.

use event_graph::counter::{EstimateCounter, ExactCounter, Measure};
use event_graph::event::Event;
use event_graph::sketch::CardinalitySketch;

fn sample_events() -> Vec<Event> {
    (0..20u64).map(|i| Event::undirected(i, i + 1, i as f64)).collect()
}

#[test_log::test]
fn exact_counter_merge_is_idempotent() {
    let mut c = ExactCounter::new(1, 8, 8);
    for e in sample_events() {
        c.insert(&e);
    }
    let before = Measure::Events.of(&c);
    let snapshot = c.clone();
    c.merge(&snapshot);
    assert_eq!(Measure::Events.of(&c), before);
}

#[test_log::test]
fn exact_counter_merge_is_commutative() {
    let events = sample_events();
    let mut a = ExactCounter::new(1, 8, 8);
    let mut b = ExactCounter::new(1, 8, 8);
    for e in &events[..10] {
        a.insert(e);
    }
    for e in &events[5..] {
        b.insert(e);
    }
    let mut ab = a.clone();
    ab.merge(&b);
    let mut ba = b.clone();
    ba.merge(&a);
    assert_eq!(Measure::Events.of(&ab), Measure::Events.of(&ba));
    assert_eq!(Measure::Nodes.of(&ab), Measure::Nodes.of(&ba));
}

#[test_log::test]
fn hll_counter_merge_is_idempotent_and_commutative() {
    let events = sample_events();
    let mut a = EstimateCounter::new(1, 64, 64);
    let mut b = EstimateCounter::new(1, 64, 64);
    for e in &events[..10] {
        a.insert(e);
    }
    for e in &events[5..] {
        b.insert(e);
    }

    let before = Measure::Events.of(&a);
    let snapshot = a.clone();
    a.merge(&snapshot);
    assert_eq!(Measure::Events.of(&a), before);

    let mut ab = a.clone();
    ab.merge(&b);
    let mut ba = b.clone();
    ba.merge(&a);
    assert_eq!(Measure::Events.of(&ab), Measure::Events.of(&ba));
}

#[test_log::test]
fn inserting_self_adds_a_mutated_vertex_to_the_node_sketch() {
    let e = Event::undirected(7, 8, 1.0);
    let mut c = ExactCounter::new(1, 8, 8);
    c.insert(&e);
    assert!(e.mutated_verts().iter().any(|v| c.nodes().contains(v)));
}
