//! Seeded pseudo-random engine.
//!
//! [`Xorshift64`] is the engine behind every random draw in the synthesizer.
//! The same seed yields the same sequence on every platform, which is what
//! makes a regenerated spectrum bit-identical to the previous one.
//!
//! # Threading
//!
//! The engine is `Send` but every draw takes `&mut self`. Two threads that
//! share one engine must serialise access behind a lock, and then the order
//! of draws (and therefore the field) depends on scheduling. For parallel
//! grid generation give each worker its own engine from
//! [`Xorshift64::for_worker`].
//!
//! The engine implements [`RngCore`], so it can drive any `rand_distr`
//! distribution directly.

use rand::rand_core::impls;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Xorshift64 engine with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of the recurrence and is replaced by a non-zero
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// 2^-53, the spacing of the f64 values produced from the top 53 bits.
    const UNIT: f64 = 1.0 / (1u64 << 53) as f64;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Derives an independent engine for worker `worker` of a parallel pass.
    ///
    /// The base seed and worker index are mixed with SplitMix64 so adjacent
    /// workers do not start on correlated states.
    pub fn for_worker(seed: u64, worker: u64) -> Self {
        let mut z = seed ^ worker.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    /// Uniform variate in [0, 1) with full 53-bit mantissa precision.
    ///
    /// Independent of the Gaussian machinery; Box-Muller draws its inputs
    /// from here in the default configuration.
    pub fn uniform_random_variable(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * Self::UNIT
    }

    /// Uniform variate in [-1, 1).
    pub fn next_signed(&mut self) -> f64 {
        2.0 * self.uniform_random_variable() - 1.0
    }

    /// Uniform variate in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.uniform_random_variable() * (max - min)
    }
}

impl RngCore for Xorshift64 {
    /// High half of the next 64-bit value; the low bits of xorshift are the
    /// weaker ones.
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every stored seed regenerates a different ocean.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        for _ in 0..3 {
            assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        }
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut a = Xorshift64::new(42);
        let mut b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn worker_engines_differ_from_each_other() {
        let mut a = Xorshift64::for_worker(7, 0);
        let mut b = Xorshift64::for_worker(7, 1);
        let first_a: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let first_b: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(first_a, first_b);
    }

    #[test]
    fn worker_engines_are_reproducible() {
        assert_eq!(Xorshift64::for_worker(99, 3), Xorshift64::for_worker(99, 3));
    }

    #[test]
    fn uniform_random_variable_in_unit_interval() {
        let mut rng = Xorshift64::new(12345);
        for i in 0..10_000 {
            let v = rng.uniform_random_variable();
            assert!((0.0..1.0).contains(&v), "{v} out of [0, 1) at {i}");
        }
    }

    #[test]
    fn next_u32_is_high_half_of_next_u64() {
        let mut a = Xorshift64::new(42);
        let mut b = Xorshift64::new(42);
        for _ in 0..16 {
            assert_eq!(u64::from(a.next_u32()), b.next_u64() >> 32);
        }
    }

    #[test]
    fn fill_bytes_is_deterministic_and_covers_tail() {
        let mut a = Xorshift64::new(5);
        let mut b = Xorshift64::new(5);
        let mut x = [0u8; 13];
        let mut y = [0u8; 13];
        a.fill_bytes(&mut x);
        b.fill_bytes(&mut y);
        assert_eq!(x, y);
        assert!(x.iter().any(|&v| v != 0));
    }

    #[test]
    fn drives_rand_distributions() {
        use rand::Rng;
        let mut rng = Xorshift64::new(77);
        for _ in 0..1000 {
            let v: f64 = rng.random_range(-2.0..3.0);
            assert!((-2.0..3.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn next_signed_in_symmetric_interval() {
        let mut rng = Xorshift64::new(31);
        for _ in 0..10_000 {
            let v = rng.next_signed();
            assert!((-1.0..1.0).contains(&v), "{v} not in [-1, 1)");
        }
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_range_in_bounds_for_any_seed_and_range(
                seed: u64,
                min in -1e6_f64..1e6,
                max in -1e6_f64..1e6,
            ) {
                prop_assume!(min < max);
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "next_range({min}, {max}) = {v}");
                }
            }

            #[test]
            fn uniform_approximately_flat(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let idx = (rng.uniform_random_variable() * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has only {count} values for seed {seed}");
                }
            }
        }
    }
}
