//! Moisture dials drawn once per map.

use crate::noise::{DomainWarp, Fbm2};
use crate::rng::SeededRng;

/// Suffix appended to the seed to key the moisture stream.
pub const MOISTURE_STREAM_SUFFIX: &str = "-moisture";

/// Per-map moisture parameters.
///
/// Drawn from `seed + "-moisture"` so they never share state with the elevation dials.
#[derive(Debug, Clone)]
pub struct MoistureDials {
    pub fbm: Fbm2,
    /// Coordinate scale applied after warping.
    pub ripple: f64,
    pub warp: DomainWarp,
}

impl MoistureDials {
    /// Draws the dials from the moisture stream of `seed`.
    pub fn for_seed(seed: &str) -> Self {
        Self::from_rng(&mut SeededRng::substream(seed, MOISTURE_STREAM_SUFFIX))
    }

    pub fn from_rng(rng: &mut SeededRng) -> Self {
        let fbm = Fbm2::from_rng(rng);
        let ripple = rng.range(1.5, 3.0);
        let warp = DomainWarp::new(rng.range(1.0, 2.0), rng.range(0.10, 0.30));
        Self { fbm, ripple, warp }
    }
}
