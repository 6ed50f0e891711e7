//! Seeded map generator: composes lattice, elevation, moisture and biomes.

use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::biomes::{Reshape, ThemeError, classify};
use crate::climate::{MoistureDials, MoistureField};
use crate::lattice::{LatticeConfig, LatticeError, RegionLattice};
use crate::rng::SeededRng;
use crate::settings::{Settings, SettingsError, WorkingSettings};
use crate::terrain::{ElevationField, ShapeConfig};

use super::stage::{StageId, run_stage};
use super::world::WorldMap;

/// Errors that can occur during generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("Lattice construction failed: {0}")]
    Lattice(#[from] LatticeError),
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),
}

/// Cache key of a built lattice; the seed is fixed per generator.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LatticeKey {
    resolution: usize,
    jitter: f64,
}

/// Map generator bound to one seed.
///
/// Each call to [`generate`](Self::generate) rebuilds every PRNG stream, the shape pose
/// and the moisture dials from the seed; only the relaxed lattice is reused between calls
/// with the same resolution and jitter.
#[derive(Debug, Clone)]
pub struct Generator {
    seed: String,
    lattice_config: LatticeConfig,
    shape_config: ShapeConfig,
    cache: Option<(LatticeKey, Arc<RegionLattice>)>,
}

impl Generator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self::with_config(seed, LatticeConfig::default(), ShapeConfig::default())
    }

    pub fn with_config(
        seed: impl Into<String>,
        lattice_config: LatticeConfig,
        shape_config: ShapeConfig,
    ) -> Self {
        Self {
            seed: seed.into(),
            lattice_config,
            shape_config,
            cache: None,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Switches to a new seed and drops the cached lattice.
    ///
    /// Maps returned earlier are unaffected.
    pub fn reseed(&mut self, seed: impl Into<String>) {
        self.seed = seed.into();
        self.cache = None;
    }

    /// Generates a map for the current seed.
    ///
    /// # Arguments
    /// * `settings` - Normalized settings; validated before any work starts
    ///
    /// # Returns
    /// A complete [`WorldMap`], or the first validation/construction error.
    pub fn generate(&mut self, settings: &Settings) -> Result<WorldMap, GenerationError> {
        let working = settings.resolve()?;
        info!(seed = %self.seed, resolution = working.resolution, "generating map");

        let lattice = run_stage(StageId::Lattice, || self.lattice(&working))?;
        let reshape = Reshape::from_settings(&working);

        let elevation: Vec<f64> = run_stage(StageId::Elevation, || {
            let mut rng = SeededRng::new(&self.seed);
            let field = ElevationField::from_rng(
                &mut rng,
                &self.shape_config,
                working.resolution,
                working.terrain_frequency,
                working.clumpiness,
                working.sea_level,
            );
            field
                .sample_regions(&lattice)
                .into_par_iter()
                .map(|raw| reshape.elevation(raw))
                .collect()
        });

        let moisture: Vec<f64> = run_stage(StageId::Moisture, || {
            let field = MoistureField::new(
                MoistureDials::for_seed(&self.seed),
                working.weather_frequency,
                working.moisture_contrast,
            );
            field
                .sample_regions(&lattice)
                .into_par_iter()
                .map(|raw| reshape.moisture(raw))
                .collect()
        });

        let biomes = run_stage(StageId::Biomes, || {
            elevation
                .par_iter()
                .zip(moisture.par_iter())
                .map(|(&e, &m)| classify(e, m))
                .collect()
        });

        let map = WorldMap::new(
            self.seed.clone(),
            working,
            lattice,
            elevation,
            moisture,
            biomes,
        );
        info!(
            regions = map.num_regions(),
            ocean_fraction = map.ocean_fraction(),
            "map generated"
        );
        Ok(map)
    }

    /// Returns the cached lattice for these settings or builds and caches a new one.
    fn lattice(&mut self, working: &WorkingSettings) -> Result<Arc<RegionLattice>, LatticeError> {
        let key = LatticeKey {
            resolution: working.resolution,
            jitter: working.jitter,
        };
        if let Some((cached, lattice)) = &self.cache
            && *cached == key
        {
            debug!(resolution = key.resolution, "reusing cached lattice");
            return Ok(Arc::clone(lattice));
        }

        let lattice = Arc::new(RegionLattice::build_with_config(
            &self.seed,
            key.resolution,
            key.jitter,
            &self.lattice_config,
        )?);
        self.cache = Some((key, Arc::clone(&lattice)));
        Ok(lattice)
    }
}

/// Generates one map for `seed`.
pub fn generate(seed: &str, settings: &Settings) -> Result<WorldMap, GenerationError> {
    Generator::new(seed).generate(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Settings {
        Settings {
            resolution: 0.0,
            ..Settings::island()
        }
    }

    #[test]
    fn test_generate_small_map() {
        let map = generate("small", &small()).unwrap();
        assert_eq!(map.num_regions(), 100);
        assert_eq!(map.elevation().len(), 100);
        assert!(map.elevation().iter().all(|e| (-1.0..=1.0).contains(e)));
        assert!(map.moisture().iter().all(|m| (0.0..=1.0).contains(m)));
        for (&e, &key) in map.elevation().iter().zip(map.biomes()) {
            assert_eq!(e < 0.0, key.is_ocean());
        }
    }

    #[test]
    fn test_lattice_is_cached_until_reseed() {
        let mut generator = Generator::new("cache");
        let a = generator.generate(&small()).unwrap();
        let b = generator
            .generate(&Settings { rainfall: 0.9, ..small() })
            .unwrap();
        assert!(Arc::ptr_eq(&a.lattice_handle(), &b.lattice_handle()));
        assert_eq!(a.elevation(), b.elevation());
        assert_ne!(a.moisture(), b.moisture());

        generator.reseed("cache");
        let c = generator.generate(&small()).unwrap();
        assert!(!Arc::ptr_eq(&a.lattice_handle(), &c.lattice_handle()));
        assert_eq!(a.lattice().sites(), c.lattice().sites());
    }

    #[test]
    fn test_jitter_change_rebuilds_lattice() {
        let mut generator = Generator::new("jitter");
        let a = generator.generate(&small()).unwrap();
        let b = generator.generate(&Settings { jitter: 0.9, ..small() }).unwrap();
        assert!(!Arc::ptr_eq(&a.lattice_handle(), &b.lattice_handle()));
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let err = generate("bad", &Settings { sea_level: 2.0, ..Default::default() }).unwrap_err();
        assert!(matches!(err, GenerationError::Settings(_)));
    }

    #[test]
    fn test_unreadable_theme_file_is_a_theme_error() {
        let dir = tempfile::tempdir().unwrap();
        let err: GenerationError = crate::biomes::Theme::from_path(dir.path().join("absent.json"))
            .unwrap_err()
            .into();
        assert!(matches!(err, GenerationError::Theme(ThemeError::Io(_))));
        assert!(err.to_string().starts_with("Theme error: IO error"));
    }

    #[test]
    fn test_summary_matches_map() {
        let map = generate("summary", &small()).unwrap();
        let summary = map.summary();
        assert_eq!(summary.num_regions, 100);
        assert_eq!(summary.resolution, 10);
        assert_eq!(summary.biomes.values().sum::<usize>(), 100);
        assert_eq!(summary.ocean_fraction, map.ocean_fraction());
        assert!(summary.elevation_range.0 <= summary.elevation_range.1);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["seed"], "summary");
    }
}
