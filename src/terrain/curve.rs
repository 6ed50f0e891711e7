//! Scalar easing and contrast curves.

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Hermite step between `edge0` and `edge1`, clamped to [0, 1].
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Exponent of the contrast curve for contrast `t` in [0, 1].
///
/// 3 at `t = 0` (flattened toward 0.5), 1 at `t = 0.5` (identity), 0.2 at `t = 1`
/// (pushed toward the extremes).
pub fn contrast_exponent(t: f64) -> f64 {
    if t <= 0.5 {
        lerp(3.0, 1.0, t / 0.5)
    } else {
        lerp(1.0, 0.2, (t - 0.5) / 0.5)
    }
}

/// Reshapes `v` in [0, 1] around 0.5 with a signed power curve.
///
/// # Arguments
/// * `v` - Field value in [0, 1]
/// * `t` - Contrast in [0, 1]; 0.5 leaves `v` unchanged
pub fn apply_contrast(v: f64, t: f64) -> f64 {
    let u = 2.0 * v - 1.0;
    let shaped = u.signum() * u.abs().powf(contrast_exponent(t));
    ((shaped + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Contrast applied to the raw elevation blend for a given sea level.
///
/// Eased between 0.45 and 1.0, so higher sea levels also sharpen the coastline.
pub fn sea_contrast(sea_level: f64) -> f64 {
    lerp(0.45, 1.0, smoothstep(0.0, 1.0, sea_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
        assert!((smoothstep(-0.1, 0.1, 0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_midpoint_is_identity() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            assert!((apply_contrast(v, 0.5) - v).abs() < 1e-12, "v = {}", v);
        }
    }

    #[test]
    fn test_contrast_fixed_points() {
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(apply_contrast(0.5, t), 0.5);
            assert!((apply_contrast(0.0, t) - 0.0).abs() < 1e-12);
            assert!((apply_contrast(1.0, t) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_contrast_direction() {
        // Low contrast pulls toward 0.5, high contrast pushes away.
        assert!(apply_contrast(0.8, 0.0) < 0.8);
        assert!(apply_contrast(0.8, 1.0) > 0.8);
        assert!(apply_contrast(0.2, 0.0) > 0.2);
        assert!(apply_contrast(0.2, 1.0) < 0.2);
    }

    #[test]
    fn test_contrast_exponent_endpoints() {
        assert_eq!(contrast_exponent(0.0), 3.0);
        assert_eq!(contrast_exponent(0.5), 1.0);
        assert!((contrast_exponent(1.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_sea_contrast_range() {
        assert!((sea_contrast(0.0) - 0.45).abs() < 1e-12);
        assert!((sea_contrast(1.0) - 1.0).abs() < 1e-12);
        assert!(sea_contrast(0.3) < sea_contrast(0.7));
    }
}
