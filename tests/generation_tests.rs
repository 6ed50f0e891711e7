//! Generation Tests - Determinism, Seed Sensitivity, Reseeding and the Island Scenario
//!
//! End-to-end tests through the public `generate` / `Generator` API.

use landmass::biomes::BiomeKey;
use landmass::{Generator, Settings, Theme, ThemeName, generate};

fn small(settings: Settings) -> Settings {
    Settings {
        resolution: 0.1,
        ..settings
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_map() {
    let settings = small(Settings::island());
    let a = generate("determinism", &settings).unwrap();
    let b = generate("determinism", &settings).unwrap();

    assert_eq!(a.lattice().sites(), b.lattice().sites());
    assert_eq!(a.elevation(), b.elevation());
    assert_eq!(a.moisture(), b.moisture());
    assert_eq!(a.biomes(), b.biomes());
}

#[test]
fn test_different_seeds_differ() {
    let settings = small(Settings::default());
    let a = generate("north", &settings).unwrap();
    let b = generate("south", &settings).unwrap();

    assert!(
        a.lattice().sites().iter().zip(b.lattice().sites()).any(|(p, q)| p != q),
        "distinct seeds should move at least one site"
    );
    assert!(a.elevation().iter().zip(b.elevation()).any(|(x, y)| x != y));
}

#[test]
fn test_lattice_ignores_non_lattice_settings() {
    let a = generate("keyed", &small(Settings::default())).unwrap();
    let b = generate(
        "keyed",
        &small(Settings {
            sea_level: 0.2,
            clumpiness: -0.4,
            rainfall: 0.9,
            ..Settings::default()
        }),
    )
    .unwrap();
    assert_eq!(a.lattice().sites(), b.lattice().sites());
}

// ============================================================================
// Reseeding
// ============================================================================

#[test]
fn test_reseed_isolation() {
    let settings = small(Settings::island());
    let mut generator = Generator::new("alpha");

    let first = generator.generate(&settings).unwrap();
    generator.reseed("beta");
    assert_eq!(generator.seed(), "beta");
    let other = generator.generate(&settings).unwrap();
    generator.reseed("alpha");
    let third = generator.generate(&settings).unwrap();

    assert_eq!(first.lattice().sites(), third.lattice().sites());
    assert_eq!(first.elevation(), third.elevation());
    assert_eq!(first.moisture(), third.moisture());
    assert_eq!(first.biomes(), third.biomes());
    assert_ne!(first.elevation(), other.elevation());
}

#[test]
fn test_earlier_maps_survive_reseed() {
    let settings = small(Settings::default());
    let mut generator = Generator::new("kept");
    let map = generator.generate(&settings).unwrap();
    let snapshot = map.elevation().to_vec();

    generator.reseed("replaced");
    generator.generate(&settings).unwrap();

    assert_eq!(map.elevation(), snapshot.as_slice());
    assert_eq!(map.seed(), "kept");
}

// ============================================================================
// Island Scenario
// ============================================================================

#[test]
fn test_island_scenario() {
    let settings = Settings {
        resolution: 0.5,
        jitter: 0.5,
        terrain_frequency: 0.65,
        clumpiness: 0.8,
        sea_level: 0.51,
        ..Settings::default()
    };
    let map = generate("test-seed", &settings).unwrap();

    assert_eq!(map.num_regions(), 105 * 105);
    assert!(map.elevation().iter().all(|e| (-1.0..=1.0).contains(e)));
    assert!(map.moisture().iter().all(|m| (0.0..=1.0).contains(m)));

    let ocean = map.ocean_fraction();
    assert!(
        (0.2..=0.6).contains(&ocean),
        "ocean fraction {:.3} outside 20-60%",
        ocean
    );

    let lattice = map.lattice();
    let v = lattice.num_regions() as i64;
    let e = lattice.num_edges() as i64;
    let f = lattice.num_triangles() as i64 + 1;
    assert_eq!(v - e + f, 2, "lattice must be a planar triangulation");
}

// ============================================================================
// Biomes and Colors
// ============================================================================

#[test]
fn test_biomes_follow_elevation_sign() {
    let map = generate("biomes", &small(Settings::island())).unwrap();
    for (&e, &key) in map.elevation().iter().zip(map.biomes()) {
        assert_eq!(e < 0.0, key == BiomeKey::Ocean);
    }
    let histogram = map.biome_histogram();
    assert_eq!(histogram.values().sum::<usize>(), map.num_regions());
}

#[test]
fn test_colors_cover_every_region() {
    let map = generate("colors", &small(Settings::inland_sea())).unwrap();
    for name in ThemeName::ALL {
        let theme = Theme::builtin(name);
        let colors = map.colors(&theme);
        assert_eq!(colors.len(), map.num_regions());
        assert!(colors.iter().all(|c| c.len() == 7 && c.starts_with('#')));
    }
}
