//! Landmass CLI - Procedural fantasy map generator.
//!
//! Generates a relaxed Voronoi region lattice for a seed and prints a summary of its
//! elevation, moisture and biomes.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use landmass::biomes::BiomeKey;
use landmass::{GenerationError, MapSummary, Settings, Theme, ThemeName, biome_color, generate};

/// Procedural fantasy landmass generator.
#[derive(Parser)]
#[command(name = "landmass")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map and print its summary.
    Generate {
        /// Seed string; the same seed and settings always give the same map.
        #[arg(short, long)]
        seed: String,

        /// Lattice resolution slider (0 = 10 sites per axis, 1 = 200).
        #[arg(short, long, default_value = "0.5")]
        resolution: f64,

        /// Initial grid jitter (0-1).
        #[arg(long, default_value = "0.5")]
        jitter: f64,

        /// Rainfall (0 = arid, 1 = saturated).
        #[arg(long, default_value = "0.5")]
        rainfall: f64,

        /// Sea level (0-1).
        #[arg(long, default_value = "0.5")]
        sea_level: f64,

        /// Shape influence (-1 = inland sea, 1 = island).
        #[arg(long, default_value = "0.5", allow_hyphen_values = true)]
        clumpiness: f64,

        /// Elevation contrast (0-1, 0.5 is neutral).
        #[arg(long, default_value = "0.5")]
        elevation_contrast: f64,

        /// Moisture contrast (0-1, 0.5 is neutral).
        #[arg(long, default_value = "0.5")]
        moisture_contrast: f64,

        /// Terrain feature frequency slider (0-1).
        #[arg(long, default_value = "0.5")]
        terrain_frequency: f64,

        /// Weather feature frequency slider (0-1).
        #[arg(long, default_value = "0.5")]
        weather_frequency: f64,

        /// Built-in color theme.
        #[arg(short, long, default_value = "classic")]
        theme: ThemeArg,

        /// Load the color theme from a JSON file instead.
        #[arg(long)]
        theme_file: Option<PathBuf>,

        /// Print the summary and per-region colors as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the themed color of one elevation/moisture pair.
    Color {
        /// Built-in color theme.
        #[arg(short, long, default_value = "classic")]
        theme: ThemeArg,

        /// Elevation in [-1, 1]; negative is ocean.
        #[arg(allow_hyphen_values = true)]
        elevation: f64,

        /// Moisture in [0, 1].
        moisture: f64,
    },

    /// List the built-in themes.
    Themes,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    /// Muted greens and tans over a blue sea.
    Classic,
    /// Desaturated sepia map.
    Parchment,
    /// Saturated greens with bright peaks.
    Verdant,
}

impl From<ThemeArg> for ThemeName {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Classic => ThemeName::Classic,
            ThemeArg::Parchment => ThemeName::Parchment,
            ThemeArg::Verdant => ThemeName::Verdant,
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: &'a MapSummary,
    theme: &'a str,
    colors: Vec<String>,
}

fn init_logging() {
    // info by default, overridable via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Generate {
            seed,
            resolution,
            jitter,
            rainfall,
            sea_level,
            clumpiness,
            elevation_contrast,
            moisture_contrast,
            terrain_frequency,
            weather_frequency,
            theme,
            theme_file,
            json,
        } => {
            let settings = Settings {
                resolution,
                jitter,
                rainfall,
                sea_level,
                clumpiness,
                elevation_contrast,
                moisture_contrast,
                terrain_frequency,
                weather_frequency,
                theme: theme.into(),
            };
            if let Err(e) = run_generate(&seed, &settings, theme_file, json) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Color {
            theme,
            elevation,
            moisture,
        } => run_color(theme.into(), elevation, moisture),
        Commands::Themes => run_themes(),
    }
}

fn load_theme(name: ThemeName, file: Option<PathBuf>) -> Result<Theme, GenerationError> {
    match file {
        Some(path) => Ok(Theme::from_path(path)?),
        None => Ok(Theme::builtin(name)),
    }
}

fn run_generate(
    seed: &str,
    settings: &Settings,
    theme_file: Option<PathBuf>,
    json: bool,
) -> Result<(), GenerationError> {
    let theme = load_theme(settings.theme, theme_file)?;

    let start = Instant::now();
    let map = generate(seed, settings)?;
    let elapsed = start.elapsed();
    let summary = map.summary();

    if json {
        let output = JsonOutput {
            summary: &summary,
            theme: theme.name(),
            colors: map.colors(&theme),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing map: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    println!("Landmass - seed {:?}", summary.seed);
    println!("==========================");
    println!();
    println!("Resolution: {}x{} sites", summary.resolution, summary.resolution);
    println!("Regions:    {:>8}", summary.num_regions);
    println!("Triangles:  {:>8}", summary.num_triangles);
    println!("Edges:      {:>8}", summary.num_edges);
    println!();
    println!("Ocean:      {:>7.1}%", summary.ocean_fraction * 100.0);
    println!(
        "Elevation:  {:.3} .. {:.3}",
        summary.elevation_range.0, summary.elevation_range.1
    );
    println!("Moisture:   {:.3} (mean)", summary.mean_moisture);
    println!();
    println!("Biomes ({} theme):", theme.name());
    for key in BiomeKey::ALL {
        let count = summary.biomes.get(&key).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        println!(
            "  {:<14} {:>8}  {}",
            key.as_str(),
            count,
            theme.base_color(key)
        );
    }
    println!();
    println!("Generated in {:.2?}", elapsed);
    Ok(())
}

fn run_color(theme: ThemeName, elevation: f64, moisture: f64) {
    if !elevation.is_finite() || !moisture.is_finite() {
        eprintln!("Error: Elevation and moisture must be finite numbers");
        std::process::exit(1);
    }
    println!("{}", biome_color(&Theme::builtin(theme), elevation, moisture));
}

fn run_themes() {
    for name in ThemeName::ALL {
        let theme = Theme::builtin(name);
        println!(
            "{:<10} saturation x{:.2}  ocean {}",
            name,
            theme.saturation(),
            theme.base_color(BiomeKey::Ocean)
        );
    }
}
