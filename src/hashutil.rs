//! The hash-stable mixer shared by the Bernoulli-trial random model (§4.D)
//! and the HyperLogLog sketch's own item hashing.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Knuth-style multiplicative mix: `acc ^ (value + 0x9E3779B97F4A7C15 + (acc
/// << 6) + (acc >> 2))`. Combining two values through this function twice in
/// either order yields different results (it's order-sensitive by design:
/// callers fold in a left-to-right sequence of values).
pub fn mix(acc: u64, value: u64) -> u64 {
    acc ^ value
        .wrapping_add(0x9E3779B97F4A7C15)
        .wrapping_add(acc << 6)
        .wrapping_add(acc >> 2)
}

/// Deterministic, non-randomized 64-bit hash of any `Hash` value, salted by
/// `seed`. Backed by `FxHasher` (the teacher's fast-hash crate) rather than
/// the randomized default hasher, because the whole point is that the same
/// `(seed, value)` pair hashes identically across runs and processes.
pub fn seeded_hash<T: Hash + ?Sized>(seed: u64, value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    value.hash(&mut hasher);
    mix(seed, hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_hash_is_deterministic() {
        assert_eq!(seeded_hash(7, "a"), seeded_hash(7, "a"));
    }

    #[test]
    fn seeded_hash_depends_on_seed() {
        assert_ne!(seeded_hash(1, "a"), seeded_hash(2, "a"));
    }
}
