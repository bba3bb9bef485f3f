//! Sampling sources for grain seed placement.
//!
//! This crate provides:
//! - `GrainRng`: the injected randomness source, with a seeded `StdRandom`
//! - `Sobol1D`: scrambled Sobol low-discrepancy sequence (first dimension)
//! - `Halton1D`: scrambled Halton low-discrepancy sequence
//! - `latin_hypercube`: stratified one-dimensional sampling
//!
//! All generators produce fractional values in [0, 1); mapping them onto a
//! grid is the caller's job.

pub mod halton;
pub mod latin;
pub mod rng;
pub mod sobol;

pub use halton::{Halton1D, FIRST_PRIME};
pub use latin::latin_hypercube;
pub use rng::{shuffle_with_rng, GrainRng, StdRandom};
pub use sobol::{Sobol1D, SOBOL_BITS};
