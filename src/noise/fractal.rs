//! Two-octave fractal noise and domain warping over a seeded simplex basis.

use noise::{NoiseFn, Simplex};
use rand::RngCore;

use crate::rng::SeededRng;

/// Bounds of the first octave weight.
const W1_RANGE: (f64, f64) = (0.30, 0.40);
/// Bounds of the second octave weight.
const W2_RANGE: (f64, f64) = (0.12, 0.18);

/// Offset separating the y warp channel from the x channel.
const WARP_Y_OFFSET: [f64; 2] = [5.2, 1.3];

/// Two-octave fractal noise with per-map weights.
///
/// `sample(x, y, freq) = clamp(0.5 + w1 * n(x/freq, y/freq) + w2 * n(2x/freq, 2y/freq), 0, 1)`
#[derive(Debug, Clone)]
pub struct Fbm2 {
    simplex: Simplex,
    w1: f64,
    w2: f64,
}

impl Fbm2 {
    /// Draws the simplex seed and both octave weights from `rng`, in that order.
    pub fn from_rng(rng: &mut SeededRng) -> Self {
        let simplex = Simplex::new(rng.next_u32());
        let w1 = rng.range(W1_RANGE.0, W1_RANGE.1);
        let w2 = rng.range(W2_RANGE.0, W2_RANGE.1);
        Self { simplex, w1, w2 }
    }

    pub fn weights(&self) -> (f64, f64) {
        (self.w1, self.w2)
    }

    /// Samples the field at `(x, y)`.
    ///
    /// # Arguments
    /// * `x`, `y` - Query point
    /// * `freq` - Feature size; larger values give smoother fields
    ///
    /// # Returns
    /// A value in [0, 1] centered on 0.5
    pub fn sample(&self, x: f64, y: f64, freq: f64) -> f64 {
        let n1 = self.simplex.get([x / freq, y / freq]);
        let n2 = self.simplex.get([2.0 * x / freq, 2.0 * y / freq]);
        (0.5 + self.w1 * n1 + self.w2 * n2).clamp(0.0, 1.0)
    }
}

/// Coordinate perturbation driven by an [`Fbm2`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainWarp {
    pub frequency: f64,
    pub strength: f64,
}

impl DomainWarp {
    pub fn new(frequency: f64, strength: f64) -> Self {
        Self {
            frequency,
            strength,
        }
    }

    /// Warps `(x, y)` using two decorrelated samples of `fbm`.
    pub fn apply(&self, fbm: &Fbm2, x: f64, y: f64, freq: f64) -> (f64, f64) {
        let kx = self.frequency * x;
        let ky = self.frequency * y;
        let wx = x + self.strength * (fbm.sample(kx, ky, freq) - 0.5);
        let wy = y + self.strength
            * (fbm.sample(kx + WARP_Y_OFFSET[0], ky + WARP_Y_OFFSET[1], freq) - 0.5);
        (wx, wy)
    }
}
