//! Procedural fantasy landmass generator.
//!
//! This crate builds a relaxed Voronoi region lattice for a seed and annotates every
//! region with elevation, moisture, a biome and a themed color. Generation is a pure
//! function of the seed string and the [`Settings`].

pub mod biomes;
pub mod climate;
pub mod geometry;
pub mod lattice;
pub mod noise;
pub mod pipeline;
pub mod rng;
pub mod settings;
pub mod terrain;

pub use biomes::{BiomeKey, HexColor, Theme, ThemeName, biome_color, classify};
pub use lattice::{LatticeConfig, RegionLattice};
pub use pipeline::{GenerationError, Generator, MapSummary, StageId, WorldMap, generate};
pub use rng::SeededRng;
pub use settings::{Settings, SettingsError, WorkingSettings};
pub use terrain::ShapeConfig;
