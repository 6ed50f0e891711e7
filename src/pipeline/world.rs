//! Immutable result of one generation.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::biomes::{BiomeKey, Theme, biome_color};
use crate::lattice::RegionLattice;
use crate::settings::WorkingSettings;

/// Region lattice with per-region elevation, moisture and biome.
///
/// All arrays are indexed like [`RegionLattice::sites`]. Fields are private; a map never
/// changes after [`Generator::generate`](super::Generator::generate) returns it.
#[derive(Debug, Clone)]
pub struct WorldMap {
    seed: String,
    settings: WorkingSettings,
    lattice: Arc<RegionLattice>,
    elevation: Vec<f64>,
    moisture: Vec<f64>,
    biomes: Vec<BiomeKey>,
}

/// Serializable overview of a [`WorldMap`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub seed: String,
    pub resolution: usize,
    pub num_regions: usize,
    pub num_triangles: usize,
    pub num_edges: usize,
    pub ocean_fraction: f64,
    pub elevation_range: (f64, f64),
    pub mean_moisture: f64,
    pub biomes: BTreeMap<BiomeKey, usize>,
}

impl WorldMap {
    pub(crate) fn new(
        seed: String,
        settings: WorkingSettings,
        lattice: Arc<RegionLattice>,
        elevation: Vec<f64>,
        moisture: Vec<f64>,
        biomes: Vec<BiomeKey>,
    ) -> Self {
        debug_assert_eq!(elevation.len(), lattice.num_regions());
        debug_assert_eq!(moisture.len(), lattice.num_regions());
        debug_assert_eq!(biomes.len(), lattice.num_regions());
        Self {
            seed,
            settings,
            lattice,
            elevation,
            moisture,
            biomes,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Settings the map was generated with, in working units.
    pub fn settings(&self) -> &WorkingSettings {
        &self.settings
    }

    pub fn lattice(&self) -> &RegionLattice {
        &self.lattice
    }

    /// Shared handle to the lattice, reused by later generations with the same key.
    pub fn lattice_handle(&self) -> Arc<RegionLattice> {
        Arc::clone(&self.lattice)
    }

    /// Elevation per region in [-1, 1]; negative is ocean.
    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    /// Moisture per region in [0, 1].
    pub fn moisture(&self) -> &[f64] {
        &self.moisture
    }

    pub fn biomes(&self) -> &[BiomeKey] {
        &self.biomes
    }

    pub fn num_regions(&self) -> usize {
        self.lattice.num_regions()
    }

    /// Fraction of regions with negative elevation.
    pub fn ocean_fraction(&self) -> f64 {
        if self.elevation.is_empty() {
            return 0.0;
        }
        let ocean = self.elevation.iter().filter(|&&e| e < 0.0).count();
        ocean as f64 / self.elevation.len() as f64
    }

    /// Region count per biome; biomes with no regions are absent.
    pub fn biome_histogram(&self) -> BTreeMap<BiomeKey, usize> {
        let mut histogram = BTreeMap::new();
        for &key in &self.biomes {
            *histogram.entry(key).or_insert(0) += 1;
        }
        histogram
    }

    /// `#rrggbb` color of every region under `theme`.
    pub fn colors(&self, theme: &Theme) -> Vec<String> {
        self.elevation
            .par_iter()
            .zip(self.moisture.par_iter())
            .map(|(&e, &m)| biome_color(theme, e, m))
            .collect()
    }

    pub fn summary(&self) -> MapSummary {
        let (lo, hi) = self
            .elevation
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| (lo.min(e), hi.max(e)));
        let mean_moisture = if self.moisture.is_empty() {
            0.0
        } else {
            self.moisture.iter().sum::<f64>() / self.moisture.len() as f64
        };

        MapSummary {
            seed: self.seed.clone(),
            resolution: self.lattice.resolution(),
            num_regions: self.lattice.num_regions(),
            num_triangles: self.lattice.num_triangles(),
            num_edges: self.lattice.num_edges(),
            ocean_fraction: self.ocean_fraction(),
            elevation_range: (lo, hi),
            mean_moisture,
            biomes: self.biome_histogram(),
        }
    }
}
