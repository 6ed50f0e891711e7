//! Convex polygon helpers for Voronoi cell construction.

use glam::DVec2;

/// Axis-aligned square `[0, size] x [0, size]` as a counter-clockwise polygon.
pub fn square(size: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(size, 0.0),
        DVec2::new(size, size),
        DVec2::new(0.0, size),
    ]
}

/// Clips a convex polygon to the half-plane of points at least as close to `site` as to
/// `other` (the `site` side of their perpendicular bisector).
pub fn clip_to_bisector(polygon: &[DVec2], site: DVec2, other: DVec2) -> Vec<DVec2> {
    let mid = (site + other) * 0.5;
    let normal = other - site;
    let side = |v: DVec2| (v - mid).dot(normal);

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let sa = side(a);
        let sb = side(b);

        if sa <= 0.0 {
            out.push(a);
        }
        if (sa <= 0.0) != (sb <= 0.0) {
            let t = sa / (sa - sb);
            out.push(a + (b - a) * t);
        }
    }
    out
}

/// Signed area (shoelace); positive for counter-clockwise polygons.
pub fn signed_area(polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    let twice: f64 = (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum();
    twice * 0.5
}

/// Area-weighted centroid of a simple polygon.
///
/// Returns `None` for fewer than 3 vertices or when `|area| < min_area`.
pub fn centroid(polygon: &[DVec2], min_area: f64) -> Option<DVec2> {
    if polygon.len() < 3 {
        return None;
    }

    let n = polygon.len();
    let mut twice_area = 0.0;
    let mut acc = DVec2::ZERO;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = a.perp_dot(b);
        twice_area += cross;
        acc += (a + b) * cross;
    }

    let area = twice_area * 0.5;
    if area.abs() < min_area {
        return None;
    }
    Some(acc / (6.0 * area))
}
