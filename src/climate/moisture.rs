//! Moisture field: warped, rippled noise reshaped by a contrast curve.

use glam::DVec2;
use rayon::prelude::*;

use crate::lattice::RegionLattice;
use crate::terrain::apply_contrast;

use super::config::MoistureDials;

/// Per-map moisture sampler. Independent of elevation and coastline.
#[derive(Debug, Clone)]
pub struct MoistureField {
    dials: MoistureDials,
    frequency: f64,
    contrast: f64,
}

impl MoistureField {
    /// # Arguments
    /// * `dials` - Per-map moisture dials
    /// * `frequency` - Working weather frequency
    /// * `contrast` - Moisture contrast in [0, 1]
    pub fn new(dials: MoistureDials, frequency: f64, contrast: f64) -> Self {
        Self {
            dials,
            frequency,
            contrast,
        }
    }

    pub fn dials(&self) -> &MoistureDials {
        &self.dials
    }

    /// Samples moisture in [0, 1] at a normalized point.
    pub fn sample(&self, p: DVec2) -> f64 {
        let d = &self.dials;
        let (wx, wy) = d.warp.apply(&d.fbm, p.x, p.y, self.frequency);
        let raw = d.fbm.sample(d.ripple * wx, d.ripple * wy, self.frequency);
        apply_contrast(raw, self.contrast)
    }

    /// Samples every region of `lattice` in parallel.
    pub fn sample_regions(&self, lattice: &RegionLattice) -> Vec<f64> {
        (0..lattice.num_regions())
            .into_par_iter()
            .map(|r| self.sample(lattice.normalized_site(r)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(field: &MoistureField) -> Vec<f64> {
        (0..400)
            .map(|i| {
                let p = DVec2::new((i % 20) as f64 / 10.0 - 1.0, (i / 20) as f64 / 10.0 - 1.0);
                field.sample(p)
            })
            .collect()
    }

    #[test]
    fn test_moisture_range() {
        let field = MoistureField::new(MoistureDials::for_seed("wet"), 0.7, 0.5);
        assert!(samples(&field).iter().all(|m| (0.0..=1.0).contains(m)));
    }

    #[test]
    fn test_contrast_spreads_values() {
        let flat = MoistureField::new(MoistureDials::for_seed("spread"), 0.7, 0.0);
        let sharp = MoistureField::new(MoistureDials::for_seed("spread"), 0.7, 1.0);
        let spread = |v: Vec<f64>| v.iter().map(|m| (m - 0.5).abs()).sum::<f64>();
        assert!(spread(samples(&sharp)) > spread(samples(&flat)));
    }

    #[test]
    fn test_moisture_reproducibility() {
        let a = MoistureField::new(MoistureDials::for_seed("same"), 0.5, 0.5);
        let b = MoistureField::new(MoistureDials::for_seed("same"), 0.5, 0.5);
        assert_eq!(samples(&a), samples(&b));
    }
}
