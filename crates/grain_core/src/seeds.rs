//! Seed placement (grain nucleation).
//!
//! Each strategy yields `orientations` positions in the flattened index
//! space `[0, cols * rows)`. The `k`-th position (1-based, in the order the
//! sampler produced it) becomes seed `k`: its label is written into the grid
//! and its coordinate is appended to the seed list.
//!
//! Two draws may land on the same cell. The later seed then overwrites the
//! earlier label, so the earlier grain never appears in the grid.

use grain_sampling::{
    latin_hypercube, shuffle_with_rng, GrainRng, Halton1D, Sobol1D, FIRST_PRIME,
};
use tracing::debug;

use crate::config::{ConfigError, SeedMethod};
use crate::grid::{Grid, Label};

/// Nucleation point of one grain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub x: usize,
    pub y: usize,
    /// 1-based placement order.
    pub label: Label,
}

impl Seed {
    pub fn new(x: usize, y: usize, label: Label) -> Self {
        Self { x, y, label }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// Place `orientations` seeds into `grid` and return them in placement order.
///
/// The Sobol power-of-two requirement is checked before anything is sampled
/// or written.
pub fn place_seeds(
    grid: &mut Grid,
    orientations: u32,
    method: SeedMethod,
    rng: &mut dyn GrainRng,
) -> Result<Vec<Seed>, ConfigError> {
    if orientations == 0 {
        return Err(ConfigError::ZeroDimension("orientations"));
    }
    if method == SeedMethod::Sobol && !orientations.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo { orientations });
    }

    let total = grid.len();
    let indices = sample_indices(total, orientations as usize, method, rng);
    debug!(
        "sampled {} seed indices with {} over {} cells",
        indices.len(),
        method,
        total
    );

    let rows = grid.rows();
    let mut seeds = Vec::with_capacity(indices.len());
    for (k, index) in indices.into_iter().enumerate() {
        let (x, y) = index_to_cell(index, rows);
        let label = (k + 1) as Label;
        grid.set(x, y, label);
        seeds.push(Seed::new(x, y, label));
    }
    Ok(seeds)
}

/// Flattened index to `(x, y)`: `x = index / rows`, `y = index % rows`.
/// On grids with `cols > rows` this spreads seeds differently from an
/// `index / cols` mapping, which would also step past the last column.
pub fn index_to_cell(index: usize, rows: usize) -> (usize, usize) {
    (index / rows, index % rows)
}

/// Map a fraction in [0, 1) onto `[0, total)`.
pub fn fraction_to_index(fraction: f64, total: usize) -> usize {
    ((fraction * total as f64) as usize).min(total.saturating_sub(1))
}

fn sample_indices(
    total: usize,
    count: usize,
    method: SeedMethod,
    rng: &mut dyn GrainRng,
) -> Vec<usize> {
    let fractions = match method {
        SeedMethod::Pseudo => {
            return (0..count).map(|_| rng.next_usize_max(total)).collect();
        }
        SeedMethod::Sobol => {
            let m = count.trailing_zeros();
            Sobol1D::scrambled(rng).random_base2(m)
        }
        SeedMethod::Halton => {
            let mut values = Halton1D::scrambled(FIRST_PRIME, rng).random(count);
            shuffle_with_rng(&mut values, rng);
            values
        }
        SeedMethod::Latin => {
            let mut values = latin_hypercube(count, rng);
            shuffle_with_rng(&mut values, rng);
            values
        }
    };
    fractions
        .into_iter()
        .map(|f| fraction_to_index(f, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::UNASSIGNED;
    use grain_sampling::StdRandom;

    #[test]
    fn test_index_to_cell() {
        assert_eq!(index_to_cell(0, 4), (0, 0));
        assert_eq!(index_to_cell(5, 4), (1, 1));
        assert_eq!(index_to_cell(15, 4), (3, 3));
        // Non-square grids stay in bounds: 3 cols x 5 rows.
        assert_eq!(index_to_cell(14, 5), (2, 4));
        // 5 cols x 3 rows: the last index lands in the last column.
        assert_eq!(index_to_cell(14, 3), (4, 2));
    }

    #[test]
    fn test_fraction_to_index() {
        assert_eq!(fraction_to_index(0.0, 16), 0);
        assert_eq!(fraction_to_index(0.5, 16), 8);
        assert_eq!(fraction_to_index(0.999_999, 16), 15);
        assert_eq!(fraction_to_index(1.0, 16), 15);
    }

    #[test]
    fn test_every_method_places_all_seeds() {
        for method in SeedMethod::ALL {
            let mut grid = Grid::new(12, 7);
            let mut rng = StdRandom::from_u64_seed(17);
            let seeds = place_seeds(&mut grid, 8, method, &mut rng).unwrap();

            assert_eq!(seeds.len(), 8, "{}", method);
            for (k, seed) in seeds.iter().enumerate() {
                assert_eq!(seed.label, k as Label + 1);
                assert!(seed.x < grid.cols() && seed.y < grid.rows());
                assert_ne!(grid.get(seed.x, seed.y), UNASSIGNED);
            }
        }
    }

    #[test]
    fn test_last_duplicate_wins() {
        // One cell: every draw collides.
        let mut grid = Grid::new(1, 1);
        let mut rng = StdRandom::from_u64_seed(0);
        let seeds = place_seeds(&mut grid, 3, SeedMethod::Pseudo, &mut rng).unwrap();

        assert_eq!(seeds.len(), 3);
        assert!(seeds.iter().all(|s| s.position() == (0, 0)));
        assert_eq!(grid.get(0, 0), 3);
    }

    #[test]
    fn test_sobol_rejects_before_writing() {
        let mut grid = Grid::new(8, 8);
        let mut rng = StdRandom::from_u64_seed(1);
        let result = place_seeds(&mut grid, 6, SeedMethod::Sobol, &mut rng);

        assert_eq!(result, Err(ConfigError::NotPowerOfTwo { orientations: 6 }));
        assert_eq!(grid.unassigned_count(), 64);
    }

    #[test]
    fn test_sobol_seeds_cover_strata() {
        // 16 Sobol points over 256 cells: one seed per block of 16 indices,
        // i.e. one per column of a 16x16 grid.
        let mut grid = Grid::new(16, 16);
        let mut rng = StdRandom::from_u64_seed(4);
        let seeds = place_seeds(&mut grid, 16, SeedMethod::Sobol, &mut rng).unwrap();

        let mut columns: Vec<usize> = seeds.iter().map(|s| s.x).collect();
        columns.sort_unstable();
        assert_eq!(columns, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_latin_seeds_cover_strata() {
        let mut grid = Grid::new(10, 10);
        let mut rng = StdRandom::from_u64_seed(12);
        let seeds = place_seeds(&mut grid, 10, SeedMethod::Latin, &mut rng).unwrap();

        let mut columns: Vec<usize> = seeds.iter().map(|s| s.x).collect();
        columns.sort_unstable();
        assert_eq!(columns, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_rng_seed_same_placement() {
        for method in SeedMethod::ALL {
            let mut a = Grid::new(20, 20);
            let mut b = Grid::new(20, 20);
            let sa = place_seeds(&mut a, 4, method, &mut StdRandom::from_u64_seed(99)).unwrap();
            let sb = place_seeds(&mut b, 4, method, &mut StdRandom::from_u64_seed(99)).unwrap();
            assert_eq!(sa, sb);
            assert_eq!(a, b);
        }
    }
}
