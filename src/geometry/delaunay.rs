//! Planar Delaunay triangulation backed by `spade`.
//!
//! `spade` owns the incremental construction; this module flattens its DCEL into the
//! half-edge layout common to dual-mesh map generators. Half-edge `e` belongs to triangle
//! `e / 3` and runs from `triangles[e]` to `triangles[next_half_edge(e)]`, and
//! `halfedges[e]` is the opposite half-edge in the neighbouring triangle or [`EMPTY`] on
//! the convex hull. Vertex indices always refer to the caller's point slice.

use std::collections::HashMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use spade::handles::FixedDirectedEdgeHandle;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation as _};

/// Marker for a half-edge with no twin (convex hull edge).
pub const EMPTY: usize = usize::MAX;

/// Triangle soup with half-edge adjacency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    /// Vertex indices, three per triangle, counterclockwise.
    pub triangles: Vec<usize>,
    /// Twin half-edge for each half-edge, or [`EMPTY`].
    pub halfedges: Vec<usize>,
    /// Convex hull vertex indices.
    pub hull: Vec<usize>,
}

impl Triangulation {
    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of undirected edges (interior edges counted once, hull edges once).
    pub fn num_edges(&self) -> usize {
        let hull_edges = self.halfedges.iter().filter(|&&h| h == EMPTY).count();
        (self.halfedges.len() + hull_edges) / 2
    }
}

#[inline]
pub fn next_half_edge(e: usize) -> usize {
    if e % 3 == 2 { e - 2 } else { e + 1 }
}

/// A site as seen by `spade`.
#[derive(Debug, Clone, Copy)]
struct Site(DVec2);

impl HasPosition for Site {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        Point2::new(self.0.x, self.0.y)
    }
}

/// Triangulates `points`.
///
/// Returns `None` when no triangle can be formed (fewer than three distinct points, or
/// all points collinear). Exact duplicates, and points `spade` rejects such as non-finite
/// coordinates, are skipped and appear in no triangle.
pub fn triangulate(points: &[DVec2]) -> Option<Triangulation> {
    if points.len() < 3 {
        return None;
    }

    let mut delaunay: DelaunayTriangulation<Site> = DelaunayTriangulation::new();
    // spade vertex index -> caller's point index; a duplicate resolves to an existing vertex
    let mut point_of_vertex: Vec<usize> = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        let Ok(handle) = delaunay.insert(Site(p)) else {
            continue;
        };
        if handle.index() == point_of_vertex.len() {
            point_of_vertex.push(i);
        }
    }

    if delaunay.num_inner_faces() == 0 {
        return None;
    }

    let num_half_edges = delaunay.num_inner_faces() * 3;
    let mut triangles = Vec::with_capacity(num_half_edges);
    let mut slot: HashMap<FixedDirectedEdgeHandle, usize> = HashMap::with_capacity(num_half_edges);

    for face in delaunay.inner_faces() {
        for edge in face.adjacent_edges() {
            slot.insert(edge.fix(), triangles.len());
            triangles.push(point_of_vertex[edge.from().fix().index()]);
        }
    }

    let mut halfedges = vec![EMPTY; num_half_edges];
    for face in delaunay.inner_faces() {
        for edge in face.adjacent_edges() {
            let twin = edge.rev();
            if twin.face().is_outer() {
                continue;
            }
            if let (Some(&e), Some(&h)) = (slot.get(&edge.fix()), slot.get(&twin.fix())) {
                halfedges[e] = h;
            }
        }
    }

    let hull = delaunay
        .convex_hull()
        .map(|edge| point_of_vertex[edge.from().fix().index()])
        .collect();

    Some(Triangulation {
        triangles,
        halfedges,
        hull,
    })
}
