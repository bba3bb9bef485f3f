//! One-dimensional Latin Hypercube sampling.

use crate::rng::{shuffle_with_rng, GrainRng};

/// Draw `n` points in [0, 1), exactly one in each stratum `[k/n, (k+1)/n)`.
///
/// Strata are visited in random order and each point is jittered uniformly
/// inside its stratum.
pub fn latin_hypercube(n: usize, rng: &mut dyn GrainRng) -> Vec<f64> {
    let mut strata: Vec<usize> = (0..n).collect();
    shuffle_with_rng(&mut strata, rng);

    let width = n as f64;
    strata
        .into_iter()
        .map(|k| {
            let p = (k as f64 + rng.next_double()) / width;
            // (k + u) / n can round up to the next stratum boundary.
            p.min(prev_float((k + 1) as f64 / width))
        })
        .collect()
}

fn prev_float(x: f64) -> f64 {
    f64::from_bits(x.to_bits() - 1)
}
