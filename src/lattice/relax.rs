//! Jittered grid seeding and Lloyd's relaxation over bounded Voronoi cells.

use glam::DVec2;
use rayon::prelude::*;

use crate::geometry::{Triangulation, centroid, clip_to_bisector, next_half_edge, square, triangulate};
use crate::rng::SeededRng;

/// Generates a `resolution x resolution` grid of cell centers, each perturbed by
/// `jitter * (rng() - rng())` along x and then y.
///
/// Points are clamped into `[0, resolution]` so every site lies inside the clipping
/// square of its Voronoi cell.
pub fn jittered_grid(resolution: usize, jitter: f64, rng: &mut SeededRng) -> Vec<DVec2> {
    let size = resolution as f64;
    let mut sites = Vec::with_capacity(resolution * resolution);

    for y in 0..resolution {
        for x in 0..resolution {
            let dx = jitter * rng.signed_unit();
            let dy = jitter * rng.signed_unit();
            let p = DVec2::new(x as f64 + 0.5 + dx, y as f64 + 0.5 + dy);
            sites.push(p.clamp(DVec2::ZERO, DVec2::splat(size)));
        }
    }

    sites
}

/// Sorted, deduplicated Delaunay neighbours of every site.
///
/// Sites skipped by the triangulation (exact duplicates) have no neighbours.
pub fn site_neighbors(num_sites: usize, triangulation: &Triangulation) -> Vec<Vec<usize>> {
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); num_sites];
    let triangles = &triangulation.triangles;

    for e in 0..triangles.len() {
        let a = triangles[e];
        let b = triangles[next_half_edge(e)];
        neighbors[a].push(b);
        neighbors[b].push(a);
    }

    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }

    neighbors
}

/// Voronoi cell of `sites[index]` clipped to `[0, size]^2`.
///
/// Intersection of the bounding square with the half-planes of each Delaunay
/// neighbour. Empty when the site has no neighbours.
pub fn voronoi_cell(sites: &[DVec2], neighbors: &[usize], index: usize, size: f64) -> Vec<DVec2> {
    if neighbors.is_empty() {
        return Vec::new();
    }

    let site = sites[index];
    let mut cell = square(size);
    for &j in neighbors {
        cell = clip_to_bisector(&cell, site, sites[j]);
        if cell.len() < 3 {
            break;
        }
    }
    cell
}

/// Result of one relaxation iteration.
#[derive(Debug, Clone)]
pub struct RelaxStep {
    /// Relaxed site positions, same order as the input.
    pub sites: Vec<DVec2>,
    /// Sites left in place because their cell was degenerate.
    pub kept: usize,
}

/// Performs one Lloyd's relaxation iteration.
///
/// Each site moves to the area-weighted centroid of its clipped Voronoi cell. A cell
/// with fewer than 3 vertices or `|area| < min_area` leaves its site unchanged.
///
/// # Returns
/// `None` if the sites cannot be triangulated.
pub fn lloyd_step(sites: &[DVec2], size: f64, min_area: f64) -> Option<RelaxStep> {
    let triangulation = triangulate(sites)?;
    let neighbors = site_neighbors(sites.len(), &triangulation);

    let moved: Vec<Option<DVec2>> = (0..sites.len())
        .into_par_iter()
        .map(|i| {
            let cell = voronoi_cell(sites, &neighbors[i], i, size);
            centroid(&cell, min_area)
        })
        .collect();

    let kept = moved.iter().filter(|c| c.is_none()).count();
    let sites = moved
        .into_iter()
        .zip(sites)
        .map(|(c, &original)| c.unwrap_or(original))
        .collect();

    Some(RelaxStep { sites, kept })
}

/// Variance of each site's distance to its nearest Delaunay neighbour.
///
/// Lower values mean a more uniform lattice.
pub fn nearest_neighbor_variance(sites: &[DVec2]) -> f64 {
    let Some(triangulation) = triangulate(sites) else {
        return 0.0;
    };
    let neighbors = site_neighbors(sites.len(), &triangulation);

    let distances: Vec<f64> = neighbors
        .iter()
        .enumerate()
        .filter(|(_, list)| !list.is_empty())
        .map(|(i, list)| {
            list.iter()
                .map(|&j| sites[i].distance(sites[j]))
                .fold(f64::MAX, f64::min)
        })
        .collect();

    if distances.is_empty() {
        return 0.0;
    }
    let mean = distances.iter().sum::<f64>() / distances.len() as f64;
    distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / distances.len() as f64
}
