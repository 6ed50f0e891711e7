//! User-facing generation settings.
//!
//! [`Settings`] holds normalized slider values; [`Settings::resolve`] validates them and
//! maps them to the working ranges the generators use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::ThemeName;
use crate::terrain::lerp;

/// Working lattice resolution range (sites per axis).
pub const RESOLUTION_RANGE: (f64, f64) = (10.0, 200.0);
/// Working noise frequency range.
pub const FREQUENCY_RANGE: (f64, f64) = (0.1, 1.3);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Setting '{name}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Setting '{0}' is not a finite number")]
    NotFinite(&'static str),
}

/// Normalized parameters, all in [0, 1] except `clumpiness` in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resolution: f64,
    pub jitter: f64,
    pub rainfall: f64,
    pub sea_level: f64,
    /// Positive: the shape is land (island). Negative: the shape is water (inland sea).
    pub clumpiness: f64,
    pub elevation_contrast: f64,
    pub moisture_contrast: f64,
    pub terrain_frequency: f64,
    pub weather_frequency: f64,
    pub theme: ThemeName,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: 0.5,
            jitter: 0.5,
            rainfall: 0.5,
            sea_level: 0.5,
            clumpiness: 0.5,
            elevation_contrast: 0.5,
            moisture_contrast: 0.5,
            terrain_frequency: 0.5,
            weather_frequency: 0.5,
            theme: ThemeName::Classic,
        }
    }
}

impl Settings {
    /// One dominant island.
    pub fn island() -> Self {
        Self {
            clumpiness: 0.8,
            sea_level: 0.51,
            terrain_frequency: 0.65,
            ..Default::default()
        }
    }

    /// Land ringing a central body of water.
    pub fn inland_sea() -> Self {
        Self {
            clumpiness: -0.7,
            sea_level: 0.45,
            rainfall: 0.6,
            ..Default::default()
        }
    }

    /// Validates every field and maps it to its working range.
    pub fn resolve(&self) -> Result<WorkingSettings, SettingsError> {
        let unit = |name, value| check(name, value, 0.0, 1.0);

        let resolution = unit("resolution", self.resolution)?;
        let jitter = unit("jitter", self.jitter)?;
        let rainfall = unit("rainfall", self.rainfall)?;
        let sea_level = unit("sea_level", self.sea_level)?;
        let clumpiness = check("clumpiness", self.clumpiness, -1.0, 1.0)?;
        let elevation_contrast = unit("elevation_contrast", self.elevation_contrast)?;
        let moisture_contrast = unit("moisture_contrast", self.moisture_contrast)?;
        let terrain_frequency = unit("terrain_frequency", self.terrain_frequency)?;
        let weather_frequency = unit("weather_frequency", self.weather_frequency)?;

        Ok(WorkingSettings {
            resolution: lerp(RESOLUTION_RANGE.0, RESOLUTION_RANGE.1, resolution).round() as usize,
            jitter,
            rainfall,
            sea_level,
            clumpiness,
            elevation_contrast,
            moisture_contrast,
            terrain_frequency: lerp(FREQUENCY_RANGE.0, FREQUENCY_RANGE.1, terrain_frequency),
            weather_frequency: lerp(FREQUENCY_RANGE.0, FREQUENCY_RANGE.1, weather_frequency),
            theme: self.theme,
        })
    }
}

fn check(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64, SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError::NotFinite(name));
    }
    if value < min || value > max {
        return Err(SettingsError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Validated settings in working units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkingSettings {
    /// Lattice sites per axis.
    pub resolution: usize,
    pub jitter: f64,
    pub rainfall: f64,
    pub sea_level: f64,
    pub clumpiness: f64,
    pub elevation_contrast: f64,
    pub moisture_contrast: f64,
    pub terrain_frequency: f64,
    pub weather_frequency: f64,
    pub theme: ThemeName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_mapping() {
        let at = |r| Settings { resolution: r, ..Default::default() }.resolve().unwrap().resolution;
        assert_eq!(at(0.0), 10);
        assert_eq!(at(0.5), 105);
        assert_eq!(at(1.0), 200);
    }

    #[test]
    fn test_frequency_mapping() {
        let working = Settings { terrain_frequency: 0.0, weather_frequency: 1.0, ..Default::default() }
            .resolve()
            .unwrap();
        assert!((working.terrain_frequency - 0.1).abs() < 1e-12);
        assert!((working.weather_frequency - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Settings { rainfall: 1.2, ..Default::default() }.resolve().unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { name: "rainfall", .. }));

        let err = Settings { clumpiness: -1.5, ..Default::default() }.resolve().unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { name: "clumpiness", .. }));

        assert!(Settings { clumpiness: -1.0, ..Default::default() }.resolve().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = Settings { sea_level: f64::NAN, ..Default::default() }.resolve().unwrap_err();
        assert_eq!(err, SettingsError::NotFinite("sea_level"));
    }

    #[test]
    fn test_presets_resolve() {
        assert!(Settings::island().resolve().is_ok());
        assert!(Settings::inland_sea().resolve().unwrap().clumpiness < 0.0);
    }

    #[test]
    fn test_serde_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "sea_level": 0.3, "theme": "verdant" }"#).unwrap();
        assert_eq!(settings.sea_level, 0.3);
        assert_eq!(settings.theme, ThemeName::Verdant);
        assert_eq!(settings.jitter, Settings::default().jitter);
    }
}
