//! Synthetic 2D polycrystalline microstructures.
//!
//! This crate provides:
//! - `Grid`: the `cols x rows` grain label matrix
//! - Seed placement with pseudo-random, Sobol, Halton or Latin Hypercube draws
//! - Cutoff-limited nearest-seed grain growth
//! - `Microstructure`: generated or loaded snapshots
//! - JSON save/load of microstructure records
//!
//! # Example
//!
//! ```ignore
//! use grain_core::{GrainConfig, Microstructure};
//! use grain_sampling::StdRandom;
//!
//! let config = GrainConfig::parse(256, 256, 64, "sobol")?;
//! let mut rng = StdRandom::from_u64_seed(7);
//! let microstructure = Microstructure::create(&config, &mut rng)?;
//! println!("{}", microstructure);
//! ```

pub mod config;
pub mod grid;
pub mod microstructure;
pub mod record_io;
pub mod seeds;
pub mod tessellation;

pub use config::{ConfigError, GrainConfig, SeedMethod, MAX_DIMENSION};
pub use grid::{Grid, GridError, Label, UNASSIGNED};
pub use microstructure::{GeneratedMicrostructure, LoadedMicrostructure, Microstructure};
pub use record_io::{
    from_json_str, load_microstructure, save_microstructure, save_microstructure_timestamped,
    timestamped_file_name, to_json_string, MicrostructureRecord, RecordError, RecordResult,
};
pub use seeds::{place_seeds, Seed};
pub use tessellation::{
    grow_grains, squared_distance, TessellationProgress, TessellationReport, CUTOFF_DISTANCE_SQ,
    CUTOFF_RADIUS,
};
