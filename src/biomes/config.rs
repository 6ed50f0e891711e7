//! Pre-classification reshaping of the raw fields.

use serde::{Deserialize, Serialize};

use crate::settings::WorkingSettings;
use crate::terrain::apply_contrast;

/// Largest shift of the zero crossing, reached at sea level 0 or 1.
const MAX_SEA_SHIFT: f64 = 0.3;

/// Moisture exponent base: rainfall 0 gives `0.01 * 2500 = 25`.
const RAINFALL_EXPONENT_BASE: f64 = 2500.0;
const RAINFALL_EXPONENT_MIN: f64 = 0.01;

/// Maps raw [0, 1] field values to the stored elevation and moisture domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reshape {
    /// Raw elevations below this (after `2 * raw - 1`) become ocean.
    pub sea_shift: f64,
    pub elevation_contrast: f64,
    pub moisture_exponent: f64,
}

impl Reshape {
    pub fn new(sea_level: f64, elevation_contrast: f64, rainfall: f64) -> Self {
        Self {
            sea_shift: (sea_level - 0.5) * 2.0 * MAX_SEA_SHIFT,
            elevation_contrast,
            moisture_exponent: RAINFALL_EXPONENT_MIN
                * RAINFALL_EXPONENT_BASE.powf(1.0 - rainfall),
        }
    }

    pub fn from_settings(settings: &WorkingSettings) -> Self {
        Self::new(
            settings.sea_level,
            settings.elevation_contrast,
            settings.rainfall,
        )
    }

    /// Raw elevation in [0, 1] to [-1, 1], negative below the shifted sea level.
    ///
    /// Each side of the shifted zero crossing is rescaled linearly so the domain stays
    /// [-1, 1]; land relief is then reshaped by the elevation contrast.
    pub fn elevation(&self, raw: f64) -> f64 {
        let s = self.sea_shift;
        let e = 2.0 * raw.clamp(0.0, 1.0) - 1.0;
        if e < s {
            ((e - s) / (1.0 + s)).clamp(-1.0, 0.0)
        } else {
            let land = ((e - s) / (1.0 - s)).clamp(0.0, 1.0);
            apply_contrast(land, self.elevation_contrast)
        }
    }

    /// Raw moisture in [0, 1] raised to the rainfall exponent.
    pub fn moisture(&self, raw: f64) -> f64 {
        raw.clamp(0.0, 1.0).powf(self.moisture_exponent)
    }
}
