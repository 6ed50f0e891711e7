//! Landmass shape configuration.

use serde::{Deserialize, Serialize};

/// Fixed bounds for the per-map shape pose.
///
/// The pose itself (rotation, warp, ripple and tubes) is drawn from the map stream;
/// these values only bound that draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapeConfig {
    /// Full width of the random center offset, in normalized units.
    pub center_drift: f64,
    /// Upper bound on the number of tubes (at least 1).
    pub max_tubes: usize,
    /// Line segments used to approximate each tube's curve.
    pub curve_segments: usize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            center_drift: 0.2,
            max_tubes: 3,
            curve_segments: 24,
        }
    }
}

impl ShapeConfig {
    /// Single tube held at the center of the map.
    pub fn centered_single() -> Self {
        Self {
            center_drift: 0.0,
            max_tubes: 1,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShapeConfig::default();
        assert_eq!(config.center_drift, 0.2);
        assert_eq!(config.max_tubes, 3);
        assert_eq!(config.curve_segments, 24);
    }

    #[test]
    fn test_centered_single() {
        let config = ShapeConfig::centered_single();
        assert_eq!(config.max_tubes, 1);
        assert_eq!(config.center_drift, 0.0);
        assert_eq!(config.curve_segments, ShapeConfig::default().curve_segments);
    }
}
