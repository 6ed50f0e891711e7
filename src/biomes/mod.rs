//! Biome classification and themed colors.
//!
//! Land regions are classified on a 4 x 3 grid of elevation family by moisture band;
//! everything below sea level (negative elevation) is ocean. Colors come from a
//! [`Theme`] palette with per-sub-band lightness and a saturation scale applied in HSL.

mod bands;
mod color;
mod config;
mod theme;

pub use bands::{
    ELEVATION_BOUNDS, ElevationBand, ElevationFamily, MOISTURE_BOUNDS, MoistureBand, band_index,
};
pub use color::{ColorParseError, HexColor, Hsl, hsl_to_rgb, rgb_to_hsl};
pub use config::Reshape;
pub use theme::{BASE_LIGHTNESS, Theme, ThemeError, ThemeName};

use serde::{Deserialize, Serialize};

/// Discrete biome tag: ocean plus every (moisture, elevation family) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeKey {
    Ocean,
    DryLow,
    MidLow,
    WetLow,
    DryMedium,
    MidMedium,
    WetMedium,
    DryHigh,
    MidHigh,
    WetHigh,
    DryVeryHigh,
    MidVeryHigh,
    WetVeryHigh,
}

/// Family rows by moisture columns.
const BIOME_GRID: [[BiomeKey; 3]; 4] = [
    [BiomeKey::DryLow, BiomeKey::MidLow, BiomeKey::WetLow],
    [BiomeKey::DryMedium, BiomeKey::MidMedium, BiomeKey::WetMedium],
    [BiomeKey::DryHigh, BiomeKey::MidHigh, BiomeKey::WetHigh],
    [BiomeKey::DryVeryHigh, BiomeKey::MidVeryHigh, BiomeKey::WetVeryHigh],
];

impl BiomeKey {
    pub const ALL: [BiomeKey; 13] = [
        BiomeKey::Ocean,
        BiomeKey::DryLow,
        BiomeKey::MidLow,
        BiomeKey::WetLow,
        BiomeKey::DryMedium,
        BiomeKey::MidMedium,
        BiomeKey::WetMedium,
        BiomeKey::DryHigh,
        BiomeKey::MidHigh,
        BiomeKey::WetHigh,
        BiomeKey::DryVeryHigh,
        BiomeKey::MidVeryHigh,
        BiomeKey::WetVeryHigh,
    ];

    pub fn land(family: ElevationFamily, moisture: MoistureBand) -> Self {
        BIOME_GRID[family as usize][moisture as usize]
    }

    pub fn is_ocean(self) -> bool {
        self == BiomeKey::Ocean
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BiomeKey::Ocean => "ocean",
            BiomeKey::DryLow => "dry_low",
            BiomeKey::MidLow => "mid_low",
            BiomeKey::WetLow => "wet_low",
            BiomeKey::DryMedium => "dry_medium",
            BiomeKey::MidMedium => "mid_medium",
            BiomeKey::WetMedium => "wet_medium",
            BiomeKey::DryHigh => "dry_high",
            BiomeKey::MidHigh => "mid_high",
            BiomeKey::WetHigh => "wet_high",
            BiomeKey::DryVeryHigh => "dry_very_high",
            BiomeKey::MidVeryHigh => "mid_very_high",
            BiomeKey::WetVeryHigh => "wet_very_high",
        }
    }
}

/// Biome plus the elevation sub-band that selected it (`None` for ocean).
fn locate(elevation: f64, moisture: f64) -> (BiomeKey, Option<ElevationBand>) {
    if elevation < 0.0 {
        return (BiomeKey::Ocean, None);
    }

    let e = elevation.clamp(0.0, 1.0);
    let m = moisture.clamp(0.0, 1.0);
    let (Some(band), Some(wetness)) = (ElevationBand::of(e), MoistureBand::of(m)) else {
        panic!(
            "band partition violated: elevation {} moisture {} matched no biome",
            elevation, moisture
        );
    };
    (BiomeKey::land(band.family(), wetness), Some(band))
}

/// Classifies one region.
///
/// # Arguments
/// * `elevation` - Reshaped elevation in [-1, 1]; negative is ocean
/// * `moisture` - Reshaped moisture in [0, 1]
///
/// # Panics
/// If a value matches no band, which only NaN inputs can cause.
pub fn classify(elevation: f64, moisture: f64) -> BiomeKey {
    locate(elevation, moisture).0
}

/// Themed `#rrggbb` color of a region.
///
/// Land colors get the theme's saturation scale and the lightness delta of their
/// elevation sub-band; ocean returns the palette color unchanged.
pub fn biome_color(theme: &Theme, elevation: f64, moisture: f64) -> String {
    let (key, band) = locate(elevation, moisture);
    theme.shade(key, band).to_string()
}
