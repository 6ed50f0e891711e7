//! Planar geometry for the region lattice.
//!
//! Provides the Delaunay triangulation (triangles plus half-edge adjacency) and the
//! convex polygon clipping used to build bounded Voronoi cells.

mod delaunay;
mod polygon;

pub use delaunay::{EMPTY, Triangulation, next_half_edge, triangulate};
pub use polygon::{centroid, clip_to_bisector, signed_area, square};
