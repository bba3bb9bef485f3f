//! One-dimensional Halton (radical inverse) sequence.
//!
//! Point `n` mirrors the base-`b` digits of `n` around the radix point.
//! The scrambled variant applies an independent random permutation of
//! `0..b` to every digit position, including the trailing zero digits, so
//! the first point is no longer pinned at 0.

use crate::rng::{shuffle_with_rng, GrainRng};

/// Base used for the single dimension the seed placer needs.
pub const FIRST_PRIME: u32 = 2;

/// Generator for a radical inverse sequence in a fixed base.
#[derive(Debug, Clone)]
pub struct Halton1D {
    base: u64,
    /// `permutations[k]` maps digit values at position `k`.
    permutations: Vec<Vec<u64>>,
    /// `base^digits`, the integer scale of one point.
    scale: u64,
    index: u64,
}

impl Halton1D {
    /// Unscrambled sequence. `base` must be at least 2.
    pub fn new(base: u32) -> Self {
        let base = u64::from(base.max(2));
        let digits = digit_count(base);
        let identity: Vec<u64> = (0..base).collect();
        Self {
            base,
            permutations: vec![identity; digits],
            scale: base.pow(digits as u32),
            index: 0,
        }
    }

    /// Scrambled sequence with per-digit permutations drawn from `rng`.
    pub fn scrambled(base: u32, rng: &mut dyn GrainRng) -> Self {
        let mut halton = Self::new(base);
        for perm in &mut halton.permutations {
            shuffle_with_rng(perm, rng);
        }
        halton
    }

    /// Next point in [0, 1).
    pub fn next_point(&mut self) -> f64 {
        let mut n = self.index;
        self.index += 1;

        // Accumulate the mirrored digits as an integer over `scale` so the
        // result stays strictly below 1.
        let mut acc = 0u64;
        let mut place = self.scale;
        for perm in &self.permutations {
            place /= self.base;
            let digit = (n % self.base) as usize;
            n /= self.base;
            acc += perm[digit] * place;
        }
        acc as f64 / self.scale as f64
    }

    /// Draw the next `n` points.
    pub fn random(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.next_point()).collect()
    }
}

/// Largest digit count whose full scale still fits in an f64 mantissa.
fn digit_count(base: u64) -> usize {
    const MANTISSA_LIMIT: u64 = 1 << 53;
    let mut digits = 0;
    let mut scale = 1u64;
    while scale <= MANTISSA_LIMIT / base {
        scale *= base;
        digits += 1;
    }
    digits
}
