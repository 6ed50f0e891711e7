//! Color themes: palettes, lightness per elevation sub-band, saturation scale.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::BiomeKey;
use super::bands::ElevationBand;
use super::color::HexColor;

/// Lightness delta of each elevation sub-band, coast first.
pub const BASE_LIGHTNESS: [f64; ElevationBand::COUNT] =
    [-0.06, -0.03, 0.0, 0.02, 0.04, 0.06, 0.09, 0.12];

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Theme JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Theme {theme:?} has no color for biome {key:?}")]
    MissingColor { theme: String, key: BiomeKey },
    #[error("Lightness override for band {0} is out of range (0-7)")]
    BandOutOfRange(usize),
    #[error("Saturation scale {0} must be finite and non-negative")]
    InvalidSaturation(f64),
}

/// Built-in theme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Classic,
    Parchment,
    Verdant,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Classic, ThemeName::Parchment, ThemeName::Verdant];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Classic => "classic",
            ThemeName::Parchment => "parchment",
            ThemeName::Verdant => "verdant",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// Built-in palettes, in `BiomeKey::ALL` order.
const CLASSIC_PALETTE: [HexColor; 13] = [
    HexColor::rgb(0x2b, 0x4a, 0x6f), // ocean
    HexColor::rgb(0xc9, 0xb2, 0x7c), HexColor::rgb(0xa3, 0xb3, 0x6b), HexColor::rgb(0x6f, 0x9a, 0x55), // low
    HexColor::rgb(0xb8, 0xa4, 0x6e), HexColor::rgb(0x8f, 0xa3, 0x5e), HexColor::rgb(0x5d, 0x8a, 0x4a), // medium
    HexColor::rgb(0x9e, 0x8f, 0x6a), HexColor::rgb(0x7f, 0x8a, 0x5c), HexColor::rgb(0x4f, 0x74, 0x44), // high
    HexColor::rgb(0xa8, 0xa2, 0x9a), HexColor::rgb(0xc4, 0xc2, 0xbc), HexColor::rgb(0xee, 0xee, 0xea), // very high
];

const PARCHMENT_PALETTE: [HexColor; 13] = [
    HexColor::rgb(0xb9, 0xc4, 0xc0),
    HexColor::rgb(0xe3, 0xd3, 0xa8), HexColor::rgb(0xd8, 0xcc, 0x9c), HexColor::rgb(0xcb, 0xc2, 0x8f),
    HexColor::rgb(0xd6, 0xc1, 0x93), HexColor::rgb(0xc9, 0xb8, 0x86), HexColor::rgb(0xba, 0xa9, 0x79),
    HexColor::rgb(0xbf, 0xa6, 0x7c), HexColor::rgb(0xad, 0x96, 0x70), HexColor::rgb(0x9c, 0x87, 0x63),
    HexColor::rgb(0xa8, 0x8f, 0x6e), HexColor::rgb(0x9b, 0x84, 0x68), HexColor::rgb(0xf2, 0xef, 0xe6),
];

const VERDANT_PALETTE: [HexColor; 13] = [
    HexColor::rgb(0x1f, 0x5f, 0x7a),
    HexColor::rgb(0xb7, 0xb3, 0x6a), HexColor::rgb(0x7f, 0xb0, 0x5a), HexColor::rgb(0x3f, 0x8f, 0x45),
    HexColor::rgb(0x9f, 0xa3, 0x5a), HexColor::rgb(0x6b, 0x9a, 0x4c), HexColor::rgb(0x3f, 0x7f, 0x3f),
    HexColor::rgb(0x7f, 0x7f, 0x55), HexColor::rgb(0x5f, 0x7a, 0x48), HexColor::rgb(0x3f, 0x6b, 0x3a),
    HexColor::rgb(0x8f, 0x8a, 0x80), HexColor::rgb(0xb0, 0xae, 0xa6), HexColor::rgb(0xf4, 0xf4, 0xf0),
];

/// Serialized form of a theme, validated into a [`Theme`].
#[derive(Deserialize)]
struct ThemeFile {
    name: String,
    palette: BTreeMap<BiomeKey, HexColor>,
    #[serde(default)]
    lightness: BTreeMap<usize, f64>,
    #[serde(default = "unit_saturation")]
    saturation: f64,
}

fn unit_saturation() -> f64 {
    1.0
}

/// Named palette with per-band lightness and a saturation scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThemeFile")]
pub struct Theme {
    name: String,
    palette: BTreeMap<BiomeKey, HexColor>,
    /// Overrides merged over [`BASE_LIGHTNESS`], keyed by sub-band index.
    lightness: BTreeMap<usize, f64>,
    saturation: f64,
}

impl TryFrom<ThemeFile> for Theme {
    type Error = ThemeError;

    fn try_from(file: ThemeFile) -> Result<Self, Self::Error> {
        Theme::new(file.name, file.palette, file.lightness, file.saturation)
    }
}

impl Theme {
    /// Validates and builds a theme.
    ///
    /// Every [`BiomeKey`] needs a palette color; lightness overrides must name one of
    /// the eight elevation sub-bands.
    pub fn new(
        name: impl Into<String>,
        palette: BTreeMap<BiomeKey, HexColor>,
        lightness: BTreeMap<usize, f64>,
        saturation: f64,
    ) -> Result<Self, ThemeError> {
        let name = name.into();
        if let Some(key) = BiomeKey::ALL.into_iter().find(|k| !palette.contains_key(k)) {
            return Err(ThemeError::MissingColor { theme: name, key });
        }
        if let Some(&band) = lightness.keys().find(|&&b| b >= ElevationBand::COUNT) {
            return Err(ThemeError::BandOutOfRange(band));
        }
        if !saturation.is_finite() || saturation < 0.0 {
            return Err(ThemeError::InvalidSaturation(saturation));
        }
        Ok(Self {
            name,
            palette,
            lightness,
            saturation,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a theme from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn builtin(name: ThemeName) -> Self {
        let (colors, lightness, saturation): (&[HexColor; 13], &[(usize, f64)], f64) = match name {
            ThemeName::Classic => (&CLASSIC_PALETTE, &[], 1.0),
            ThemeName::Parchment => (&PARCHMENT_PALETTE, &[(0, -0.02), (1, -0.01)], 0.6),
            ThemeName::Verdant => (&VERDANT_PALETTE, &[(7, 0.15)], 1.15),
        };

        Self {
            name: name.as_str().to_string(),
            palette: BiomeKey::ALL.into_iter().zip(colors.iter().copied()).collect(),
            lightness: lightness.iter().copied().collect(),
            saturation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Unadjusted palette color.
    pub fn base_color(&self, key: BiomeKey) -> HexColor {
        self.palette[&key]
    }

    /// Lightness delta of a sub-band: theme override if present, else the base table.
    pub fn lightness_delta(&self, band: ElevationBand) -> f64 {
        self.lightness
            .get(&band.index())
            .copied()
            .unwrap_or(BASE_LIGHTNESS[band.index()])
    }

    /// Final color of a biome drawn in the given elevation sub-band.
    ///
    /// Without a band (ocean) the palette color is returned as is.
    pub fn shade(&self, key: BiomeKey, band: Option<ElevationBand>) -> HexColor {
        let base = self.base_color(key);
        let Some(band) = band else {
            return base;
        };

        let mut hsl = base.to_hsl();
        hsl.s = (hsl.s * self.saturation).clamp(0.0, 1.0);
        hsl.l = (hsl.l + self.lightness_delta(band)).clamp(0.0, 1.0);
        HexColor::from_hsl(hsl)
    }
}
