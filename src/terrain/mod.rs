//! Elevation generation.
//!
//! A frozen [`ShapePose`] of one to three bent tubes outlines the landmass; the
//! [`ElevationField`] blends that shape with base noise and reshapes the result with a
//! sea-level-driven contrast curve.

mod config;
mod curve;
mod elevation;
mod shape;

pub use config::ShapeConfig;
pub use curve::{apply_contrast, contrast_exponent, lerp, sea_contrast, smoothstep};
pub use elevation::ElevationField;
pub use shape::{ShapePose, Tube};
