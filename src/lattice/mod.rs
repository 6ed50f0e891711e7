//! Region lattice: evenly spaced sites from a relaxed jittered grid.
//!
//! The lattice is keyed only by `(seed, resolution)` (plus the jitter amount): its PRNG
//! stream is `seed + resolution`, so changing any other setting reuses the same regions.
//! Site order is row-major from the initial grid and is the index space of every
//! per-region array in a [`WorldMap`](crate::pipeline::WorldMap).

mod config;
mod relax;

pub use config::LatticeConfig;
pub use relax::{
    RelaxStep, jittered_grid, lloyd_step, nearest_neighbor_variance, site_neighbors, voronoi_cell,
};

use glam::DVec2;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::geometry::{EMPTY, Triangulation, next_half_edge, triangulate};
use crate::rng::SeededRng;

/// Errors raised while building a lattice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error("Resolution {0} is too small: at least 2 sites per axis are required")]
    ResolutionTooSmall(usize),
    #[error("Jitter {0} is outside [0, 1]")]
    InvalidJitter(f64),
    #[error("Lattice of {0} sites cannot be triangulated")]
    Degenerate(usize),
}

/// Relaxed sites with their Delaunay triangulation.
#[derive(Debug, Clone, Serialize)]
pub struct RegionLattice {
    resolution: usize,
    sites: Vec<DVec2>,
    triangulation: Triangulation,
    #[serde(skip)]
    neighbors: Vec<Vec<usize>>,
    #[serde(skip)]
    on_hull: Vec<bool>,
}

impl RegionLattice {
    /// Builds a lattice with the default relaxation settings.
    ///
    /// # Arguments
    /// * `seed` - Map seed; the lattice stream is `seed + resolution`
    /// * `resolution` - Sites per axis (at least 2)
    /// * `jitter` - Initial grid perturbation in `[0, 1]`
    pub fn build(seed: &str, resolution: usize, jitter: f64) -> Result<Self, LatticeError> {
        Self::build_with_config(seed, resolution, jitter, &LatticeConfig::default())
    }

    pub fn build_with_config(
        seed: &str,
        resolution: usize,
        jitter: f64,
        config: &LatticeConfig,
    ) -> Result<Self, LatticeError> {
        if resolution < 2 {
            return Err(LatticeError::ResolutionTooSmall(resolution));
        }
        if !(0.0..=1.0).contains(&jitter) {
            return Err(LatticeError::InvalidJitter(jitter));
        }

        let mut rng = SeededRng::substream(seed, &resolution.to_string());
        let size = resolution as f64;
        let mut sites = jittered_grid(resolution, jitter, &mut rng);

        // Iterations are sequential: each one triangulates the previous result.
        for iteration in 0..config.lloyd_iterations {
            let step = lloyd_step(&sites, size, config.min_cell_area)
                .ok_or(LatticeError::Degenerate(sites.len()))?;
            debug!(iteration, kept = step.kept, "lloyd relaxation");
            sites = step.sites;
        }

        Self::from_sites(resolution, sites)
    }

    /// Triangulates already-placed sites inside `[0, resolution]^2`.
    pub fn from_sites(resolution: usize, sites: Vec<DVec2>) -> Result<Self, LatticeError> {
        if sites.len() < 3 {
            return Err(LatticeError::Degenerate(sites.len()));
        }
        let triangulation = triangulate(&sites).ok_or(LatticeError::Degenerate(sites.len()))?;
        let neighbors = site_neighbors(sites.len(), &triangulation);

        let mut on_hull = vec![false; sites.len()];
        for &h in &triangulation.hull {
            on_hull[h] = true;
        }

        Ok(Self {
            resolution,
            sites,
            triangulation,
            neighbors,
            on_hull,
        })
    }

    /// Sites per axis; sites live in `[0, resolution]^2`.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn num_regions(&self) -> usize {
        self.sites.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangulation.len()
    }

    /// Undirected Delaunay edges.
    pub fn num_edges(&self) -> usize {
        self.triangulation.num_edges()
    }

    pub fn num_half_edges(&self) -> usize {
        self.triangulation.halfedges.len()
    }

    /// Start and end region of half-edge `e`.
    pub fn half_edge_endpoints(&self, e: usize) -> (usize, usize) {
        let t = &self.triangulation.triangles;
        (t[e], t[next_half_edge(e)])
    }

    /// True when half-edge `e` lies on the convex hull.
    pub fn is_boundary_edge(&self, e: usize) -> bool {
        self.triangulation.halfedges[e] == EMPTY
    }

    /// True when the region's Voronoi cell is open (its site is on the convex hull).
    pub fn is_boundary_region(&self, region: usize) -> bool {
        self.on_hull[region]
    }

    /// Regions sharing a Delaunay edge with `region`.
    pub fn region_neighbors(&self, region: usize) -> &[usize] {
        &self.neighbors[region]
    }

    /// Voronoi polygon of `region`, clipped to the lattice square.
    pub fn cell_polygon(&self, region: usize) -> Vec<DVec2> {
        voronoi_cell(
            &self.sites,
            &self.neighbors[region],
            region,
            self.resolution as f64,
        )
    }

    /// Site position in `[-1, 1]^2`, the frame the noise fields are sampled in.
    pub fn normalized_site(&self, region: usize) -> DVec2 {
        self.sites[region] / self.resolution as f64 * 2.0 - DVec2::ONE
    }
}
