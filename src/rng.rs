//! Deterministic seeded random stream.
//!
//! Every random decision in a generation is drawn from a [`SeededRng`] built from the
//! seed string. Independent streams are derived by suffixing the seed (for example
//! `"{seed}-moisture"`), so two consumers never share mutable state.
//!
//! The float output has a granularity of 1e-6: the raw xorshift word is reduced modulo
//! one million. This keeps streams reproducible across platforms at the cost of entropy
//! and is a known limitation of the generator.

use rand::RngCore;
use rand::rand_core::impls;

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Substitute state for seeds whose hash is zero (xorshift would stay at zero forever).
const ZERO_HASH_REPLACEMENT: u32 = 0x9E37_79B9;

const FLOAT_STEPS: u32 = 1_000_000;

/// Hashes a seed string to a nonzero 32-bit xorshift state.
///
/// FNV-1a over the UTF-16 code units of the string.
pub fn hash_seed(seed: &str) -> u32 {
    let hash = seed.encode_utf16().fold(FNV_OFFSET, |acc, unit| {
        (acc ^ unit as u32).wrapping_mul(FNV_PRIME)
    });
    if hash == 0 { ZERO_HASH_REPLACEMENT } else { hash }
}

/// Xorshift32 stream keyed by a seed string.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    /// Creates the independent stream `seed + suffix`.
    pub fn substream(seed: &str, suffix: &str) -> Self {
        Self::new(&format!("{seed}{suffix}"))
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value in `[0, 1)` with 1e-6 granularity.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.step() % FLOAT_STEPS) as f64 / FLOAT_STEPS as f64
    }

    /// Uniform value in `[lo, hi)`.
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Difference of two uniforms: zero-mean, center-biased value in `(-1, 1)`.
    #[inline]
    pub fn signed_unit(&mut self) -> f64 {
        let a = self.next_f64();
        let b = self.next_f64();
        a - b
    }
}

/// Raw xorshift words, so callers holding only the seed can use `rand::Rng` helpers on
/// the same deterministic stream.
impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}
