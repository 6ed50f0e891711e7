//! Noise primitives shared by the elevation and moisture fields.
//!
//! Uses the `noise` crate's simplex basis, seeded once per map from the map stream.

mod fractal;

pub use fractal::{DomainWarp, Fbm2};
