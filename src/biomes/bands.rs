//! Elevation and moisture banding.
//!
//! Both partitions are ascending, inclusive upper bounds ending at 1.0, so every value in
//! [0, 1] falls into exactly one band and a value equal to a bound belongs to the lower
//! band.

use serde::{Deserialize, Serialize};

/// Upper bounds of the eight elevation sub-bands (two per family).
pub const ELEVATION_BOUNDS: [f64; 8] = [0.10, 0.25, 0.40, 0.55, 0.70, 0.82, 0.92, 1.0];

/// Upper bounds of the dry, mid and wet bands.
pub const MOISTURE_BOUNDS: [f64; 3] = [1.0 / 3.0, 2.0 / 3.0, 1.0];

/// Index of the band containing `value`, or `None` when it lies above the last bound.
///
/// NaN compares false against every bound and falls past the end.
pub fn band_index(bounds: &[f64], value: f64) -> Option<usize> {
    let i = bounds.partition_point(|&upper| !(value <= upper));
    (i < bounds.len()).then_some(i)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationFamily {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ElevationFamily {
    pub const ALL: [ElevationFamily; 4] = [
        ElevationFamily::Low,
        ElevationFamily::Medium,
        ElevationFamily::High,
        ElevationFamily::VeryHigh,
    ];
}

/// One of the eight elevation sub-bands, numbered from the coast upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElevationBand(u8);

impl ElevationBand {
    pub const COUNT: usize = ELEVATION_BOUNDS.len();

    /// Band of a land elevation in [0, 1].
    pub fn of(elevation: f64) -> Option<Self> {
        band_index(&ELEVATION_BOUNDS, elevation).map(|i| Self(i as u8))
    }

    /// Band by index; `None` past the last band.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn family(self) -> ElevationFamily {
        ElevationFamily::ALL[self.index() / 2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureBand {
    Dry,
    Mid,
    Wet,
}

impl MoistureBand {
    pub const ALL: [MoistureBand; 3] = [MoistureBand::Dry, MoistureBand::Mid, MoistureBand::Wet];

    pub fn of(moisture: f64) -> Option<Self> {
        band_index(&MOISTURE_BOUNDS, moisture).map(|i| Self::ALL[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_breakpoints_resolve_to_lower_band() {
        for (i, &upper) in ELEVATION_BOUNDS.iter().enumerate() {
            assert_eq!(ElevationBand::of(upper).map(ElevationBand::index), Some(i));
        }
        for (i, &upper) in MOISTURE_BOUNDS.iter().enumerate() {
            assert_eq!(MoistureBand::of(upper), Some(MoistureBand::ALL[i]));
        }
        assert_eq!(ElevationBand::of(0.1000001).map(ElevationBand::index), Some(1));
    }

    #[test]
    fn test_partitions_are_total_on_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v: f64 = rng.random();
            let band = ElevationBand::of(v).expect("elevation band");
            let lower = if band.index() == 0 { f64::NEG_INFINITY } else { ELEVATION_BOUNDS[band.index() - 1] };
            assert!(v > lower && v <= ELEVATION_BOUNDS[band.index()]);
            assert!(MoistureBand::of(v).is_some());
        }
        assert_eq!(ElevationBand::of(0.0).map(ElevationBand::index), Some(0));
        assert_eq!(MoistureBand::of(0.0), Some(MoistureBand::Dry));
    }

    #[test]
    fn test_values_outside_partition_miss() {
        assert_eq!(ElevationBand::of(1.5), None);
        assert_eq!(ElevationBand::of(f64::NAN), None);
        assert_eq!(MoistureBand::of(f64::NAN), None);
    }

    #[test]
    fn test_families_pair_sub_bands() {
        let families: Vec<ElevationFamily> = (0..ElevationBand::COUNT)
            .filter_map(ElevationBand::from_index)
            .map(ElevationBand::family)
            .collect();
        assert_eq!(
            families,
            vec![
                ElevationFamily::Low,
                ElevationFamily::Low,
                ElevationFamily::Medium,
                ElevationFamily::Medium,
                ElevationFamily::High,
                ElevationFamily::High,
                ElevationFamily::VeryHigh,
                ElevationFamily::VeryHigh,
            ]
        );
        assert_eq!(ElevationBand::from_index(8), None);
    }
}
