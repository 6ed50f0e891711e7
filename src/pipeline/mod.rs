//! Pipeline module for orchestrating map generation.
//!
//! A [`Generator`] runs the lattice, elevation, moisture and biome stages for one seed
//! and returns an immutable [`WorldMap`].

mod generator;
mod stage;
mod world;

pub use generator::{GenerationError, Generator, generate};
pub use stage::StageId;
pub use world::{MapSummary, WorldMap};
