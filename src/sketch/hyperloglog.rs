//! Probabilistic cardinality sketch (§4.B), HyperLogLog-class.
//!
//! Dense register array, standard estimator with small-range (linear
//! counting) correction. Precision is fixed at construction from the
//! caller's size hint so that sketches merged together during the estimator
//! sweep (§4.E) always share the same register count.

use super::CardinalitySketch;
use crate::hashutil::seeded_hash;
use std::hash::Hash;
use std::marker::PhantomData;

/// Registers use 4 bits of the hash for addressing by default (16 buckets),
/// growing up to `MAX_PRECISION` buckets for larger size hints. Relative
/// error is `1.04 / sqrt(m)`, so more buckets trade memory for accuracy.
const MIN_PRECISION: u32 = 4;
const MAX_PRECISION: u32 = 16;

fn precision_for_hint(size_hint: usize) -> u32 {
    // Want m ~= size_hint / 4 registers, clamped to the supported range.
    let target = ((size_hint / 4).max(1) as f64).log2().ceil() as u32;
    target.clamp(MIN_PRECISION, MAX_PRECISION)
}

#[derive(Debug)]
pub struct HyperLogLog<T> {
    seed: u64,
    precision: u32,
    registers: Vec<u8>,
    _marker: PhantomData<T>,
}

impl<T> Clone for HyperLogLog<T> {
    fn clone(&self) -> Self {
        HyperLogLog {
            seed: self.seed,
            precision: self.precision,
            registers: self.registers.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Hash> HyperLogLog<T> {
    fn m(&self) -> usize {
        1usize << self.precision
    }

    fn alpha(m: usize) -> f64 {
        match m {
            16 => 0.673,
            32 => 0.697,
            64 => 0.709,
            _ => 0.7213 / (1.0 + 1.079 / m as f64),
        }
    }

    /// Relative standard error of this sketch's estimate, `1.04/sqrt(m)`.
    pub fn rel_err(&self) -> f64 {
        1.04 / (self.m() as f64).sqrt()
    }

    /// Upper-tail probability that a true cardinality exceeds `threshold`,
    /// given this sketch currently estimates `self_size` (clamped to
    /// `[0, max_size]`). Models the estimator as normally distributed around
    /// its true value with standard deviation `self_size * rel_err()`
    /// (§4.G/§6.4's `p_larger(other_est, self_size, max_size)`).
    pub fn p_larger(&self, threshold: f64, self_size: f64, max_size: f64) -> f64 {
        if threshold >= max_size {
            return 0.0;
        }
        if self_size <= 0.0 {
            return 0.0;
        }
        let sigma = (self_size * self.rel_err()).max(1e-9);
        let z = (threshold - self_size) / (sigma * std::f64::consts::SQRT_2);
        0.5 * erfc(z)
    }
}

/// Abramowitz & Stegun 7.1.26, max error 1.5e-7 — sufficient for a pruning
/// heuristic that only needs to compare against a significance threshold.
fn erfc(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736
                + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let erf = 1.0 - poly * (-x * x).exp();
    1.0 - sign * erf
}

impl<T: Hash> CardinalitySketch for HyperLogLog<T> {
    type Item = T;

    fn new(seed: u64, size_hint: usize) -> Self {
        let precision = precision_for_hint(size_hint);
        HyperLogLog {
            seed,
            precision,
            registers: vec![0u8; 1usize << precision],
            _marker: PhantomData,
        }
    }

    fn insert(&mut self, item: &T) {
        let hash = seeded_hash(self.seed, item);
        let idx = (hash >> (64 - self.precision)) as usize;
        let rest = hash << self.precision | (1u64 << (self.precision - 1));
        let rho = rest.leading_zeros() as u8 + 1;
        if rho > self.registers[idx] {
            self.registers[idx] = rho;
        }
    }

    fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.precision, other.precision, "merging sketches of different precision");
        for (a, b) in self.registers.iter_mut().zip(other.registers.iter()) {
            if *b > *a {
                *a = *b;
            }
        }
    }

    fn estimate(&self) -> f64 {
        let m = self.m() as f64;
        let sum: f64 = self.registers.iter().map(|&r| 2f64.powi(-(r as i32))).sum();
        let raw = Self::alpha(self.m()) * m * m / sum;

        let zeros = self.registers.iter().filter(|&&r| r == 0).count();
        if raw <= 2.5 * m && zeros > 0 {
            m * (m / zeros as f64).ln()
        } else {
            raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_within_tolerance_for_large_set() {
        let mut hll: HyperLogLog<u64> = HyperLogLog::new(1, 40_000);
        for i in 0..10_000u64 {
            hll.insert(&i);
        }
        let est = hll.estimate();
        let rel_err = (est - 10_000.0).abs() / 10_000.0;
        assert!(rel_err < 0.1, "relative error too high: {rel_err}");
    }

    #[test]
    fn merge_is_commutative_on_estimate() {
        let mut a: HyperLogLog<u64> = HyperLogLog::new(1, 1000);
        let mut b: HyperLogLog<u64> = HyperLogLog::new(1, 1000);
        for i in 0..500u64 {
            a.insert(&i);
        }
        for i in 250..750u64 {
            b.insert(&i);
        }
        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab.estimate(), ba.estimate());
    }

    #[test]
    fn p_larger_is_near_zero_far_below_estimate() {
        let mut hll: HyperLogLog<u64> = HyperLogLog::new(1, 4000);
        for i in 0..1000u64 {
            hll.insert(&i);
        }
        let est = hll.estimate();
        let p = hll.p_larger(est * 3.0, est, 1_000_000.0);
        assert!(p < 0.01);
    }

    #[test]
    fn p_larger_is_zero_at_or_above_max_size() {
        let hll: HyperLogLog<u64> = HyperLogLog::new(1, 1000);
        assert_eq!(hll.p_larger(500.0, 100.0, 500.0), 0.0);
    }
}
