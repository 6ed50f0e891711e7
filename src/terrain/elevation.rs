//! Elevation field: landmass shape blended with base noise, then contrast-shaped.

use glam::DVec2;
use rayon::prelude::*;

use crate::lattice::RegionLattice;
use crate::noise::Fbm2;
use crate::rng::SeededRng;

use super::config::ShapeConfig;
use super::curve::{apply_contrast, lerp, sea_contrast};
use super::shape::ShapePose;

/// Per-map elevation sampler.
///
/// Returns raw values in [0, 1]; the sea-level shift into [-1, 1] happens when the
/// orchestrator reshapes the field before classification.
#[derive(Debug, Clone)]
pub struct ElevationField {
    fbm: Fbm2,
    pose: ShapePose,
    frequency: f64,
    clumpiness: f64,
    contrast: f64,
}

impl ElevationField {
    /// Draws the noise basis and then the shape pose from the map stream.
    ///
    /// # Arguments
    /// * `rng` - Map stream (keyed by the bare seed)
    /// * `config` - Shape bounds
    /// * `resolution` - Lattice sites per axis
    /// * `frequency` - Working terrain frequency
    /// * `clumpiness` - Shape influence in [-1, 1]; positive makes the shape land
    /// * `sea_level` - Normalized sea level in [0, 1]
    pub fn from_rng(
        rng: &mut SeededRng,
        config: &ShapeConfig,
        resolution: usize,
        frequency: f64,
        clumpiness: f64,
        sea_level: f64,
    ) -> Self {
        let fbm = Fbm2::from_rng(rng);
        let pose = ShapePose::from_rng(rng, config, resolution);
        Self {
            fbm,
            pose,
            frequency,
            clumpiness,
            contrast: sea_contrast(sea_level),
        }
    }

    pub fn pose(&self) -> &ShapePose {
        &self.pose
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    /// Samples raw elevation at a normalized point in `[-1, 1]^2`.
    pub fn sample(&self, p: DVec2) -> f64 {
        let c = self.clumpiness;
        let mask = self.pose.mask(&self.fbm, p, self.frequency);
        let coast = lerp(0.5 * (1.0 + c), 0.5 * (1.0 - c), mask);
        let base = self.fbm.sample(p.x, p.y, self.frequency);
        let blended = base + 0.5 * c.abs() * (coast - base);
        apply_contrast(blended, self.contrast)
    }

    /// Samples every region of `lattice` in parallel.
    pub fn sample_regions(&self, lattice: &RegionLattice) -> Vec<f64> {
        (0..lattice.num_regions())
            .into_par_iter()
            .map(|r| self.sample(lattice.normalized_site(r)))
            .collect()
    }
}
