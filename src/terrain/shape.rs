//! Signed-distance landmass shape built from bent tubes.
//!
//! A [`ShapePose`] is drawn once per map and then only read, so the mask can be
//! sampled for every region in parallel.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::noise::{DomainWarp, Fbm2};
use crate::rng::SeededRng;

use super::config::ShapeConfig;
use super::curve::smoothstep;

/// Peak radius multiplier by tube count; fewer tubes are drawn thicker.
const TUBE_COUNT_SCALE: [f64; 3] = [1.55, 1.12, 0.95];

const RIPPLE_FREQUENCY: (f64, f64) = (2.0, 4.0);
const RIPPLE_AMPLITUDE: (f64, f64) = (0.10, 0.30);
const WARP_FREQUENCY: (f64, f64) = (1.5, 2.5);
const WARP_STRENGTH: (f64, f64) = (0.10, 0.25);
const SOFTNESS: (f64, f64) = (0.05, 0.15);

/// Quadratic Bezier tube whose radius swells toward the middle of the curve.
#[derive(Debug, Clone)]
pub struct Tube {
    start: DVec2,
    control: DVec2,
    end: DVec2,
    peak_radius: f64,
    end_radius: f64,
    /// Curve sampled at `segments + 1` evenly spaced parameters.
    polyline: Vec<DVec2>,
}

impl Tube {
    /// Draws a tube whose midpoint lies within the central region of the map.
    ///
    /// # Arguments
    /// * `rng` - Map stream
    /// * `radius_scale` - Multiplier on the peak radius
    /// * `segments` - Polyline resolution for distance queries
    pub fn from_rng(rng: &mut SeededRng, radius_scale: f64, segments: usize) -> Self {
        let mut start = DVec2::new(rng.range(-0.75, 0.75), rng.range(-0.75, 0.75));
        let angle = rng.range(0.0, TAU);
        let length = rng.range(1.3, 1.9);
        let mut end = start + DVec2::from_angle(angle) * length;

        // Recenter so the midpoint stays in the central box.
        let mid = (start + end) * 0.5;
        let shift = mid.clamp(DVec2::splat(-0.35), DVec2::splat(0.35)) - mid;
        start += shift;
        end += shift;
        let mid = mid + shift;

        let bend = rng.range(-0.4, 0.4) * length;
        let normal = (end - start).perp() / length;
        let control = mid + normal * bend;

        let peak_radius = rng.range(0.42, 0.55) * radius_scale;
        let end_radius = peak_radius * rng.range(0.35, 0.6);

        let mut tube = Self {
            start,
            control,
            end,
            peak_radius,
            end_radius,
            polyline: Vec::new(),
        };
        let segments = segments.max(1);
        tube.polyline = (0..=segments)
            .map(|i| tube.point_at(i as f64 / segments as f64))
            .collect();
        tube
    }

    pub fn point_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Bell profile: `end_radius` at both ends, `peak_radius` at `t = 0.5`.
    pub fn radius_at(&self, t: f64) -> f64 {
        self.end_radius + (self.peak_radius - self.end_radius) * 4.0 * t * (1.0 - t)
    }

    pub fn peak_radius(&self) -> f64 {
        self.peak_radius
    }

    pub fn endpoints(&self) -> (DVec2, DVec2) {
        (self.start, self.end)
    }

    /// Signed distance from `p` to the tube surface; negative inside.
    pub fn signed_distance(&self, p: DVec2) -> f64 {
        let segments = (self.polyline.len() - 1) as f64;
        let mut best = f64::INFINITY;

        for (i, pair) in self.polyline.windows(2).enumerate() {
            let a = pair[0];
            let ab = pair[1] - a;
            let len_sq = ab.length_squared();
            let u = if len_sq > 0.0 {
                ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let closest = a + ab * u;
            let d = closest.distance(p) - self.radius_at((i as f64 + u) / segments);
            best = best.min(d);
        }

        best
    }
}

/// Frozen per-map shape state: placement, warp, ripple and tubes.
#[derive(Debug, Clone)]
pub struct ShapePose {
    center: DVec2,
    sin: f64,
    cos: f64,
    warp: DomainWarp,
    ripple_frequency: f64,
    ripple_amplitude: f64,
    softness: f64,
    aa_radius: f64,
    tubes: Vec<Tube>,
}

impl ShapePose {
    /// Draws a pose from the map stream.
    ///
    /// # Arguments
    /// * `rng` - Map stream, positioned after the elevation [`Fbm2`] draw
    /// * `config` - Shape bounds
    /// * `resolution` - Lattice sites per axis; sets the anti-alias radius
    pub fn from_rng(rng: &mut SeededRng, config: &ShapeConfig, resolution: usize) -> Self {
        let cx = (rng.next_f64() - 0.5) * config.center_drift;
        let cy = (rng.next_f64() - 0.5) * config.center_drift;
        let (sin, cos) = (rng.next_f64() * TAU).sin_cos();

        let warp = DomainWarp::new(
            rng.range(WARP_FREQUENCY.0, WARP_FREQUENCY.1),
            rng.range(WARP_STRENGTH.0, WARP_STRENGTH.1),
        );
        let ripple_frequency = rng.range(RIPPLE_FREQUENCY.0, RIPPLE_FREQUENCY.1);
        let ripple_amplitude = rng.range(RIPPLE_AMPLITUDE.0, RIPPLE_AMPLITUDE.1);
        let softness = rng.range(SOFTNESS.0, SOFTNESS.1);

        let max_tubes = config.max_tubes.max(1);
        let count = (1 + (rng.next_f64() * max_tubes as f64) as usize).min(max_tubes);
        let scale = TUBE_COUNT_SCALE[(count - 1).min(TUBE_COUNT_SCALE.len() - 1)];
        let tubes = (0..count)
            .map(|_| Tube::from_rng(rng, scale, config.curve_segments))
            .collect();

        Self {
            center: DVec2::new(cx, cy),
            sin,
            cos,
            warp,
            ripple_frequency,
            ripple_amplitude,
            softness,
            aa_radius: 1.0 / resolution.max(1) as f64,
            tubes,
        }
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn softness(&self) -> f64 {
        self.softness
    }

    pub fn aa_radius(&self) -> f64 {
        self.aa_radius
    }

    /// Maps a normalized point into the pose-local (centered, unrotated) frame.
    pub fn to_local(&self, p: DVec2) -> DVec2 {
        let d = p - self.center;
        DVec2::new(d.x * self.cos + d.y * self.sin, -d.x * self.sin + d.y * self.cos)
    }

    /// Rippled signed distance to the nearest tube at one point.
    pub fn signed_distance(&self, fbm: &Fbm2, p: DVec2, freq: f64) -> f64 {
        let local = self.to_local(p);
        let (wx, wy) = self.warp.apply(fbm, local.x, local.y, freq);
        let warped = DVec2::new(wx, wy);

        let sd = self
            .tubes
            .iter()
            .map(|tube| tube.signed_distance(warped))
            .fold(f64::INFINITY, f64::min);
        let ripple = fbm.sample(self.ripple_frequency * wx, self.ripple_frequency * wy, freq);
        sd - self.ripple_amplitude * (ripple - 0.5)
    }

    /// Shape mask in [0, 1]: 0 deep inside, 1 far outside.
    ///
    /// Averages four samples offset by the anti-alias radius along each axis.
    pub fn mask(&self, fbm: &Fbm2, p: DVec2, freq: f64) -> f64 {
        let r = self.aa_radius;
        let offsets = [
            DVec2::new(r, 0.0),
            DVec2::new(-r, 0.0),
            DVec2::new(0.0, r),
            DVec2::new(0.0, -r),
        ];
        offsets
            .iter()
            .map(|&o| {
                let sd = self.signed_distance(fbm, p + o, freq);
                smoothstep(-self.softness, self.softness, sd)
            })
            .sum::<f64>()
            / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_pose(seed: &str, config: &ShapeConfig) -> (Fbm2, ShapePose) {
        let mut rng = SeededRng::new(seed);
        let fbm = Fbm2::from_rng(&mut rng);
        let pose = ShapePose::from_rng(&mut rng, config, 64);
        (fbm, pose)
    }

    #[test]
    fn test_tube_midpoint_is_central() {
        let mut rng = SeededRng::new("tubes");
        for _ in 0..50 {
            let tube = Tube::from_rng(&mut rng, 1.0, 24);
            let (a, b) = tube.endpoints();
            let mid = (a + b) * 0.5;
            assert!(mid.x.abs() <= 0.35 + 1e-12 && mid.y.abs() <= 0.35 + 1e-12);
            let length = a.distance(b);
            assert!(length > 1.3 - 1e-9 && length < 1.9 + 1e-9, "length {}", length);
        }
    }

    #[test]
    fn test_tube_radius_profile() {
        let mut rng = SeededRng::new("profile");
        let tube = Tube::from_rng(&mut rng, 1.0, 24);
        assert!((tube.radius_at(0.5) - tube.peak_radius()).abs() < 1e-12);
        assert!(tube.radius_at(0.0) < tube.radius_at(0.25));
        assert!((tube.radius_at(0.0) - tube.radius_at(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tube_signed_distance_sign() {
        let mut rng = SeededRng::new("sdf");
        let tube = Tube::from_rng(&mut rng, 1.0, 24);
        assert!(tube.signed_distance(tube.point_at(0.5)) < 0.0);
        assert!(tube.signed_distance(DVec2::new(10.0, 10.0)) > 0.0);
    }

    #[test]
    fn test_tube_count_bounds() {
        let config = ShapeConfig::default();
        for i in 0..40 {
            let (_, pose) = draw_pose(&format!("count-{i}"), &config);
            assert!((1..=3).contains(&pose.tubes().len()));
        }
        let (_, single) = draw_pose("single", &ShapeConfig::centered_single());
        assert_eq!(single.tubes().len(), 1);
        assert_eq!(single.center(), DVec2::ZERO);
    }

    #[test]
    fn test_pose_dials_within_bounds() {
        let (_, pose) = draw_pose("dials", &ShapeConfig::default());
        assert!(pose.center().x.abs() <= 0.1 && pose.center().y.abs() <= 0.1);
        assert!((0.05..0.15).contains(&pose.softness()));
        assert!((pose.aa_radius() - 1.0 / 64.0).abs() < 1e-15);
    }

    #[test]
    fn test_local_frame_preserves_distance() {
        let (_, pose) = draw_pose("frame", &ShapeConfig::default());
        let p = DVec2::new(0.4, -0.7);
        let local = pose.to_local(p);
        assert!((local.length() - (p - pose.center()).length()).abs() < 1e-12);
    }

    #[test]
    fn test_mask_range_and_far_field() {
        let (fbm, pose) = draw_pose("mask", &ShapeConfig::default());
        for j in 0..20 {
            for i in 0..20 {
                let p = DVec2::new(i as f64 / 10.0 - 1.0, j as f64 / 10.0 - 1.0);
                let m = pose.mask(&fbm, p, 0.9);
                assert!((0.0..=1.0).contains(&m));
            }
        }
        assert_eq!(pose.mask(&fbm, DVec2::new(8.0, 8.0), 0.9), 1.0);
    }

    #[test]
    fn test_pose_reproducibility() {
        let (fa, a) = draw_pose("same", &ShapeConfig::default());
        let (fb, b) = draw_pose("same", &ShapeConfig::default());
        let p = DVec2::new(0.1, 0.2);
        assert_eq!(a.mask(&fa, p, 0.8), b.mask(&fb, p, 0.8));
        assert_eq!(a.tubes().len(), b.tubes().len());
    }
}
