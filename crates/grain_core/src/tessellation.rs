//! Cutoff-limited nearest-seed grain growth.
//!
//! Every unassigned cell takes the label of its nearest seed, considering only
//! seeds within `CUTOFF_DISTANCE_SQ` (a radius of 128 cells). This is an
//! approximation of a Voronoi tessellation: a cell with no seed inside the
//! cutoff keeps `UNASSIGNED`, which is a valid result on large sparse grids.
//!
//! Ties go to the seed evaluated first (placement order), because the running
//! minimum only moves on a strictly smaller distance.

use tracing::debug;

use crate::grid::{Grid, Label, UNASSIGNED};
use crate::seeds::Seed;

/// Radius of influence of one seed, in cells.
pub const CUTOFF_RADIUS: i64 = 128;

/// Seeds farther than this squared distance are ignored.
pub const CUTOFF_DISTANCE_SQ: i64 = CUTOFF_RADIUS * CUTOFF_RADIUS;

/// Observer notified once per finished column.
pub trait TessellationProgress {
    fn column_done(&mut self, column: usize, total_columns: usize);
}

impl TessellationProgress for () {
    fn column_done(&mut self, _column: usize, _total_columns: usize) {}
}

/// Outcome of a growth pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TessellationReport {
    /// Cells that received a label during this pass.
    pub assigned: usize,
    /// Cells out of reach of every seed.
    pub unassigned: usize,
}

/// Squared Euclidean distance between two cells, saturating at `i64::MAX`.
#[inline]
pub fn squared_distance(a: (usize, usize), b: (usize, usize)) -> i64 {
    let dx = i64::try_from(a.0.abs_diff(b.0)).unwrap_or(i64::MAX);
    let dy = i64::try_from(a.1.abs_diff(b.1)).unwrap_or(i64::MAX);
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

/// Label of the nearest seed within the cutoff, reading each seed's label
/// from the grid at the seed's coordinate.
pub fn nearest_seed_label(grid: &Grid, seeds: &[Seed], cell: (usize, usize)) -> Option<Label> {
    let mut best: Option<(i64, Label)> = None;
    for seed in seeds {
        let d = squared_distance(seed.position(), cell);
        if d > CUTOFF_DISTANCE_SQ {
            continue;
        }
        if best.map_or(true, |(min, _)| d < min) {
            best = Some((d, grid.get(seed.x, seed.y)));
        }
    }
    best.map(|(_, label)| label)
}

/// Fill every unassigned cell of `grid`. Columns outer, rows inner.
pub fn grow_grains(
    grid: &mut Grid,
    seeds: &[Seed],
    progress: &mut dyn TessellationProgress,
) -> TessellationReport {
    let cols = grid.cols();
    let rows = grid.rows();
    let mut report = TessellationReport::default();

    for i in 0..cols {
        for j in 0..rows {
            if grid.get(i, j) != UNASSIGNED {
                continue;
            }
            match nearest_seed_label(grid, seeds, (i, j)) {
                Some(label) => {
                    grid.set(i, j, label);
                    report.assigned += 1;
                }
                None => report.unassigned += 1,
            }
        }
        progress.column_done(i, cols);
    }

    debug!(
        "grain growth assigned {} cells, {} out of reach",
        report.assigned, report.unassigned
    );
    report
}
