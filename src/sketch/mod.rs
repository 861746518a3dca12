//! Cardinality sketches: mergeable approximate (and exact) set-size estimators.
//!
//! Two backends share the [`CardinalitySketch`] contract (§4.B): a
//! HyperLogLog-class probabilistic sketch for the estimator sweep, and an
//! exact hash-set backend for full traversals where the real membership is
//! needed, not just its size.

pub mod exact;
pub mod hyperloglog;

pub use exact::ExactSet;
pub use hyperloglog::HyperLogLog;

/// A mergeable approximate (or exact) set-size estimator.
pub trait CardinalitySketch: Clone {
    type Item;

    /// A fresh, empty sketch. `seed` drives any internal hashing;
    /// `size_hint` lets dense backends size their storage up front.
    fn new(seed: u64, size_hint: usize) -> Self;

    fn insert(&mut self, item: &Self::Item);

    /// Fold `other`'s contents into `self`. Associative and commutative.
    fn merge(&mut self, other: &Self);

    fn estimate(&self) -> f64;
}

/// A sketch whose contents must no longer change. Emitted by the estimator
/// (§4.E "Snapshots") so that a consumer can read `estimate()`/`merge()`
/// without being able to call `insert()` on something already handed out.
#[derive(Clone, Debug)]
pub struct Snapshot<S>(S);

impl<S: CardinalitySketch> Snapshot<S> {
    pub fn new(sketch: S) -> Self {
        Snapshot(sketch)
    }

    pub fn estimate(&self) -> f64 {
        self.0.estimate()
    }

    pub fn merge(&mut self, other: &Snapshot<S>) {
        self.0.merge(&other.0);
    }
}

impl<S> std::ops::Deref for Snapshot<S> {
    type Target = S;
    fn deref(&self) -> &S {
        &self.0
    }
}
