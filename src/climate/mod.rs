//! Moisture generation.
//!
//! Moisture is a noise field on its own PRNG stream; it has no coupling to elevation or
//! to the coastline.

mod config;
mod moisture;

pub use config::{MOISTURE_STREAM_SUFFIX, MoistureDials};
pub use moisture::MoistureField;
