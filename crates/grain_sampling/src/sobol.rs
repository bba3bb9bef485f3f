//! One-dimensional Sobol low-discrepancy sequence.
//!
//! The first Sobol dimension uses the base-2 direction numbers
//! `v_j = 2^-(j+1)`, which makes the unscrambled sequence the van der Corput
//! sequence visited in Gray-code order: `0, 0.5, 0.75, 0.25, 0.375, ...`.
//!
//! Scrambling follows the usual linear matrix scramble: every direction
//! number is multiplied by a random lower-triangular bit matrix with a unit
//! diagonal, and the whole sequence is XOR-ed with a random digital shift.
//! A scrambled sequence keeps the stratification of the original (every
//! `2^m`-point prefix puts exactly one point in each dyadic interval of
//! width `2^-m`) while removing the fixed first point at zero.

use crate::rng::GrainRng;

/// Bits of precision of each generated point.
pub const SOBOL_BITS: u32 = 32;

const SCALE: f64 = (1u64 << SOBOL_BITS) as f64;

/// Generator for the first Sobol dimension.
#[derive(Debug, Clone)]
pub struct Sobol1D {
    directions: [u64; SOBOL_BITS as usize],
    /// Current point as a `SOBOL_BITS`-bit integer.
    state: u64,
    /// Number of points produced so far.
    generated: u64,
}

impl Sobol1D {
    /// Unscrambled generator (first point is exactly 0).
    pub fn unscrambled() -> Self {
        let mut directions = [0u64; SOBOL_BITS as usize];
        for (j, v) in directions.iter_mut().enumerate() {
            *v = 1u64 << (SOBOL_BITS as usize - 1 - j);
        }
        Self {
            directions,
            state: 0,
            generated: 0,
        }
    }

    /// Scrambled generator drawing its matrix and shift from `rng`.
    pub fn scrambled(rng: &mut dyn GrainRng) -> Self {
        let bits = SOBOL_BITS as usize;
        let mut directions = [0u64; SOBOL_BITS as usize];

        // Column j of the lower-triangular matrix: diagonal bit set, random
        // bits below it.
        for (j, v) in directions.iter_mut().enumerate() {
            let mut column = 1u64 << (bits - 1 - j);
            for i in (j + 1)..bits {
                if rng.next_bool() {
                    column |= 1u64 << (bits - 1 - i);
                }
            }
            *v = column;
        }

        Self {
            directions,
            state: rng.next_u32() as u64,
            generated: 0,
        }
    }

    /// Next point in [0, 1), or `None` once all `2^SOBOL_BITS` points are used.
    pub fn next_point(&mut self) -> Option<f64> {
        if self.generated == 0 {
            self.generated = 1;
            return Some(self.state as f64 / SCALE);
        }
        if self.generated >= 1u64 << SOBOL_BITS {
            return None;
        }
        let bit = self.generated.trailing_zeros() as usize;
        self.state ^= self.directions[bit];
        self.generated += 1;
        Some(self.state as f64 / SCALE)
    }

    /// Draw the next `2^m` points.
    ///
    /// Balance properties only hold when starting from a fresh generator.
    pub fn random_base2(&mut self, m: u32) -> Vec<f64> {
        let count = 1u64 << m.min(SOBOL_BITS);
        (0..count).map_while(|_| self.next_point()).collect()
    }

    /// Number of points produced so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::StdRandom;

    #[test]
    fn test_unscrambled_matches_van_der_corput_gray_order() {
        let mut sobol = Sobol1D::unscrambled();
        let points = sobol.random_base2(3);
        assert_eq!(
            points,
            vec![0.0, 0.5, 0.75, 0.25, 0.375, 0.875, 0.625, 0.125]
        );
    }

    #[test]
    fn test_precision_covers_largest_power_of_two_count() {
        // random_base2(31) must not be clamped for 2^31 orientations.
        let largest = 1u32 << 31;
        assert!(largest.trailing_zeros() < SOBOL_BITS);

        let sobol = Sobol1D::unscrambled();
        assert_eq!(sobol.directions[0], 1u64 << (SOBOL_BITS - 1));
        assert_eq!(sobol.directions[SOBOL_BITS as usize - 1], 1);
    }

    #[test]
    fn test_scrambled_points_in_unit_interval() {
        let mut rng = StdRandom::from_u64_seed(11);
        let mut sobol = Sobol1D::scrambled(&mut rng);
        for p in sobol.random_base2(10) {
            assert!((0.0..1.0).contains(&p), "point {} out of range", p);
        }
        assert_eq!(sobol.generated(), 1024);
    }

    #[test]
    fn test_scrambled_prefix_is_stratified() {
        let mut rng = StdRandom::from_u64_seed(5);
        let mut sobol = Sobol1D::scrambled(&mut rng);
        let m = 6;
        let n = 1usize << m;
        let points = sobol.random_base2(m);

        let mut hits = vec![0u32; n];
        for p in points {
            hits[(p * n as f64) as usize] += 1;
        }
        assert!(hits.iter().all(|&h| h == 1), "strata hits: {:?}", hits);
    }

    #[test]
    fn test_scrambled_is_reproducible() {
        let a = Sobol1D::scrambled(&mut StdRandom::from_u64_seed(9)).random_base2(4);
        let b = Sobol1D::scrambled(&mut StdRandom::from_u64_seed(9)).random_base2(4);
        assert_eq!(a, b);
    }
}
