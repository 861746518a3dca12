//! Exact set backend for the sketch contract (§4.B), used by the full
//! traversals in §4.F where real membership — not just cardinality — is
//! needed.

use super::CardinalitySketch;
use rustc_hash::FxHashSet;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct ExactSet<T> {
    items: FxHashSet<T>,
}

impl<T: Eq + Hash + Clone> ExactSet<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Eq + Hash + Clone> CardinalitySketch for ExactSet<T> {
    type Item = T;

    fn new(_seed: u64, size_hint: usize) -> Self {
        ExactSet {
            items: FxHashSet::with_capacity_and_hasher(size_hint, Default::default()),
        }
    }

    fn insert(&mut self, item: &T) {
        self.items.insert(item.clone());
    }

    fn merge(&mut self, other: &Self) {
        self.items.extend(other.items.iter().cloned());
    }

    fn estimate(&self) -> f64 {
        self.items.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut s: ExactSet<u64> = ExactSet::new(0, 4);
        s.insert(&1);
        s.insert(&2);
        assert!(s.contains(&1));
        assert!(!s.contains(&3));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn merge_unions_sets() {
        let mut a: ExactSet<u64> = ExactSet::new(0, 4);
        a.insert(&1);
        let mut b: ExactSet<u64> = ExactSet::new(0, 4);
        b.insert(&2);
        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(&1) && a.contains(&2));
    }

    #[test]
    fn estimate_is_exact() {
        let mut s: ExactSet<u64> = ExactSet::new(0, 4);
        for i in 0..37u64 {
            s.insert(&i);
        }
        assert_eq!(s.estimate(), 37.0);
    }
}
