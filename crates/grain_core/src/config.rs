//! Generation parameters and configuration errors.
//!
//! A `GrainConfig` is validated in full before any grid is allocated, so a
//! rejected configuration never leaves partial state behind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest accepted `cols` or `rows`; keeps squared cell distances in `i64`.
pub const MAX_DIMENSION: usize = 1 << 30;

/// Errors raised for invalid generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `seed_method` is not one of the supported strategy names
    UnknownSeedMethod(String),
    /// A dimension or the grain count is zero
    ZeroDimension(&'static str),
    /// A dimension exceeds `MAX_DIMENSION`
    DimensionTooLarge { field: &'static str, value: usize },
    /// Sobol sampling needs a power-of-two grain count
    NotPowerOfTwo { orientations: u32 },
    /// `cols * rows` does not fit in the address space
    GridTooLarge { cols: usize, rows: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownSeedMethod(name) => write!(
                f,
                "unknown seed method '{}' (expected one of: pseudo, sobol, halton, latin)",
                name
            ),
            ConfigError::ZeroDimension(field) => write!(f, "'{}' must be positive", field),
            ConfigError::DimensionTooLarge { field, value } => write!(
                f,
                "'{}' is {}, the limit is {}",
                field, value, MAX_DIMENSION
            ),
            ConfigError::NotPowerOfTwo { orientations } => write!(
                f,
                "sobol seeding needs a power-of-two orientation count, got {}",
                orientations
            ),
            ConfigError::GridTooLarge { cols, rows } => {
                write!(f, "grid of {} x {} cells is too large", cols, rows)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Seed placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMethod {
    /// Independent uniform draws, with replacement
    Pseudo,
    /// Scrambled Sobol sequence of exactly `orientations` points
    Sobol,
    /// Scrambled Halton sequence, shuffled
    Halton,
    /// Latin Hypercube sample, shuffled
    Latin,
}

impl SeedMethod {
    pub const ALL: [SeedMethod; 4] = [
        SeedMethod::Pseudo,
        SeedMethod::Sobol,
        SeedMethod::Halton,
        SeedMethod::Latin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeedMethod::Pseudo => "pseudo",
            SeedMethod::Sobol => "sobol",
            SeedMethod::Halton => "halton",
            SeedMethod::Latin => "latin",
        }
    }
}

impl FromStr for SeedMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeedMethod::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ConfigError::UnknownSeedMethod(s.to_string()))
    }
}

impl fmt::Display for SeedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of one microstructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrainConfig {
    /// Number of columns (outer grid dimension, `x`).
    pub cols: usize,
    /// Number of rows (inner grid dimension, `y`).
    pub rows: usize,
    /// Number of grains, i.e. number of seeds.
    pub orientations: u32,
    pub seed_method: SeedMethod,
}

impl GrainConfig {
    pub fn new(cols: usize, rows: usize, orientations: u32, seed_method: SeedMethod) -> Self {
        Self {
            cols,
            rows,
            orientations,
            seed_method,
        }
    }

    /// Build and validate a config from a strategy name.
    pub fn parse(
        cols: usize,
        rows: usize,
        orientations: u32,
        seed_method: &str,
    ) -> Result<Self, ConfigError> {
        let config = Self::new(cols, rows, orientations, seed_method.parse()?);
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint needed before touching a grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 {
            return Err(ConfigError::ZeroDimension("cols"));
        }
        if self.rows == 0 {
            return Err(ConfigError::ZeroDimension("rows"));
        }
        if self.orientations == 0 {
            return Err(ConfigError::ZeroDimension("orientations"));
        }
        for (field, value) in [("cols", self.cols), ("rows", self.rows)] {
            if value > MAX_DIMENSION {
                return Err(ConfigError::DimensionTooLarge { field, value });
            }
        }
        self.total_cells()?;
        if self.seed_method == SeedMethod::Sobol && !self.orientations.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                orientations: self.orientations,
            });
        }
        Ok(())
    }

    /// `cols * rows`, or `GridTooLarge` on overflow.
    pub fn total_cells(&self) -> Result<usize, ConfigError> {
        self.cols
            .checked_mul(self.rows)
            .filter(|&n| i64::try_from(n).is_ok())
            .ok_or(ConfigError::GridTooLarge {
                cols: self.cols,
                rows: self.rows,
            })
    }
}
