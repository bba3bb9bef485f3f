//! Random number generator abstraction for seed sampling.
//!
//! Every sampler in this crate draws from a `GrainRng` passed in by the
//! caller, so a run is fully reproducible from a single `u64` seed:
//!
//! - `StdRandom`: wraps `rand::rngs::StdRng` (the default)
//!
//! # Example
//!
//! ```ignore
//! use grain_sampling::{GrainRng, StdRandom};
//!
//! let mut rng = StdRandom::from_u64_seed(42);
//! let index = rng.next_usize_max(100); // 0..100
//! let f = rng.next_double(); // 0.0..1.0
//! let bits = rng.next_u32(); // full 32-bit word
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait for random number generators used by the seed samplers.
///
/// Object safe so the placer can hold a `&mut dyn GrainRng`.
pub trait GrainRng {
    /// Returns a random integer in [0, max). Returns 0 when `max == 0`.
    fn next_usize_max(&mut self, max: usize) -> usize;

    /// Returns a random double in [0.0, 1.0).
    fn next_double(&mut self) -> f64;

    /// Returns a uniformly distributed 32-bit word.
    fn next_u32(&mut self) -> u32;

    /// Returns a random boolean.
    fn next_bool(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

/// Shuffle a slice in place using the Fisher-Yates algorithm.
/// This is a free function since generic methods aren't dyn-compatible.
pub fn shuffle_with_rng<T>(slice: &mut [T], rng: &mut dyn GrainRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_usize_max(i + 1);
        slice.swap(i, j);
    }
}

/// Standard Rust RNG wrapper using `rand::rngs::StdRng`.
#[derive(Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create from a u64 seed.
    pub fn from_u64_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from OS entropy. Returns the generator together with the seed
    /// it was built from so the run can be replayed with `from_u64_seed`.
    pub fn from_entropy() -> (Self, u64) {
        let seed: u64 = rand::thread_rng().gen();
        (Self::from_u64_seed(seed), seed)
    }
}

impl GrainRng for StdRandom {
    fn next_usize_max(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }

    fn next_double(&mut self) -> f64 {
        self.rng.gen()
    }

    fn next_u32(&mut self) -> u32 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_random_ranges() {
        let mut rng = StdRandom::from_u64_seed(42);

        for _ in 0..100 {
            let v = rng.next_usize_max(100);
            assert!(v < 100);
        }

        for _ in 0..100 {
            let v = rng.next_double();
            assert!((0.0..1.0).contains(&v));
        }

        assert_eq!(rng.next_usize_max(0), 0);
    }

    #[test]
    fn test_std_random_is_reproducible() {
        let mut a = StdRandom::from_u64_seed(7);
        let mut b = StdRandom::from_u64_seed(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_entropy_seed_replays() {
        let (mut rng, seed) = StdRandom::from_entropy();
        let mut replay = StdRandom::from_u64_seed(seed);
        assert_eq!(rng.next_u32(), replay.next_u32());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRandom::from_u64_seed(3);
        let mut values: Vec<usize> = (0..50).collect();
        shuffle_with_rng(&mut values, &mut rng);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}
