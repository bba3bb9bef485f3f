//! Generated and loaded microstructures.
//!
//! A microstructure is either freshly generated (it knows its seeds) or
//! loaded from a record (it only knows its labels). Callers match on
//! `Microstructure` to find out which capabilities are available.

use grain_sampling::GrainRng;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

use crate::config::{ConfigError, GrainConfig};
use crate::grid::{Grid, Label, UNASSIGNED};
use crate::record_io::{MicrostructureRecord, RecordError};
use crate::seeds::{place_seeds, Seed};
use crate::tessellation::{grow_grains, TessellationProgress, TessellationReport};

/// Output of a full seed-placement + growth run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMicrostructure {
    config: GrainConfig,
    grid: Grid,
    seeds: Vec<Seed>,
    report: TessellationReport,
}

impl GeneratedMicrostructure {
    /// Validate `config`, place seeds and grow grains.
    pub fn generate(
        config: &GrainConfig,
        rng: &mut dyn GrainRng,
        progress: &mut dyn TessellationProgress,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Grid::new(config.cols, config.rows);
        let seeds = place_seeds(&mut grid, config.orientations, config.seed_method, rng)?;
        let report = grow_grains(&mut grid, &seeds, progress);

        info!(
            "generated {}x{} microstructure: {} {} seeds, {} distinct grains, {} cells out of reach",
            config.cols,
            config.rows,
            seeds.len(),
            config.seed_method,
            grid.distinct_labels(),
            report.unassigned
        );

        Ok(Self {
            config: config.clone(),
            grid,
            seeds,
            report,
        })
    }

    pub fn config(&self) -> &GrainConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seeds in placement order; `seeds()[k].label == k + 1`.
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn report(&self) -> TessellationReport {
        self.report
    }
}

/// Read-only snapshot rebuilt from a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMicrostructure {
    pub(crate) orientations: u32,
    pub(crate) grid: Grid,
}

impl LoadedMicrostructure {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn orientations(&self) -> u32 {
        self.orientations
    }

    /// Best-effort seed positions: the first cell (columns outer, rows
    /// inner) carrying each label present in the grid, keyed by label.
    /// Labels that do not occur have no entry.
    ///
    /// These are not the original nucleation points, only cells inside the
    /// corresponding grain.
    pub fn recover_seed_locations(&self) -> BTreeMap<Label, Seed> {
        let mut found = BTreeMap::new();
        for (x, column) in self.grid.columns().enumerate() {
            for (y, &label) in column.iter().enumerate() {
                if label != UNASSIGNED {
                    found.entry(label).or_insert_with(|| Seed::new(x, y, label));
                }
            }
        }
        found
    }
}

/// A microstructure grid, generated or loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Microstructure {
    Generated(GeneratedMicrostructure),
    Loaded(LoadedMicrostructure),
}

impl Microstructure {
    /// Generate a new microstructure without progress reporting.
    pub fn create(config: &GrainConfig, rng: &mut dyn GrainRng) -> Result<Self, ConfigError> {
        Self::create_with_progress(config, rng, &mut ())
    }

    pub fn create_with_progress(
        config: &GrainConfig,
        rng: &mut dyn GrainRng,
        progress: &mut dyn TessellationProgress,
    ) -> Result<Self, ConfigError> {
        GeneratedMicrostructure::generate(config, rng, progress).map(Microstructure::Generated)
    }

    /// Rebuild a snapshot from a record, validating its shape.
    pub fn from_record(record: MicrostructureRecord) -> Result<Self, RecordError> {
        LoadedMicrostructure::try_from(record).map(Microstructure::Loaded)
    }

    pub fn to_record(&self) -> MicrostructureRecord {
        MicrostructureRecord {
            cols: self.cols(),
            rows: self.rows(),
            orientations: self.orientations(),
            grid: self.grid().to_columns(),
        }
    }

    pub fn grid(&self) -> &Grid {
        match self {
            Microstructure::Generated(m) => &m.grid,
            Microstructure::Loaded(m) => &m.grid,
        }
    }

    pub fn cols(&self) -> usize {
        self.grid().cols()
    }

    pub fn rows(&self) -> usize {
        self.grid().rows()
    }

    pub fn orientations(&self) -> u32 {
        match self {
            Microstructure::Generated(m) => m.config.orientations,
            Microstructure::Loaded(m) => m.orientations,
        }
    }

    /// Seeds are only known for generated microstructures.
    pub fn seeds(&self) -> Option<&[Seed]> {
        match self {
            Microstructure::Generated(m) => Some(m.seeds()),
            Microstructure::Loaded(_) => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Microstructure::Generated(_))
    }
}

impl fmt::Display for Microstructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.grid(), f)
    }
}
