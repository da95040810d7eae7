//! Deterministic noise helpers for synthetic correspondence sets.
//!
//! Values are a pure function of `(seed, index)`, computed with a local
//! SplitMix64 stream rather than a `rand` generator, so fixtures do not
//! change when `rand` does.

use crate::{Real, Vec2};

/// Deterministic uniform pixel noise in `[-max_abs_px, +max_abs_px]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniformPixelNoise {
    /// Base seed controlling the pseudo-random sequence.
    pub seed: u64,
    /// Maximum absolute per-axis noise (pixels).
    pub max_abs_px: Real,
}

impl UniformPixelNoise {
    /// Noise vector (pixels) for the correspondence at `idx`.
    pub fn sample(&self, idx: usize) -> Vec2 {
        let max_abs = self.max_abs_px.abs();
        if max_abs == 0.0 {
            return Vec2::zeros();
        }
        let mut stream = SplitMix64::for_index(self.seed, idx);
        Vec2::new(
            stream.next_symmetric(max_abs),
            stream.next_symmetric(max_abs),
        )
    }

    /// `uv` shifted by the noise of correspondence `idx`.
    pub fn apply(&self, idx: usize, uv: Vec2) -> Vec2 {
        uv + self.sample(idx)
    }
}

/// Deterministic unit vector for `(seed, idx)`.
pub fn unit_direction(seed: u64, idx: usize) -> Vec2 {
    let angle = SplitMix64::for_index(seed, idx).next_unit() * std::f64::consts::TAU;
    Vec2::new(angle.cos(), angle.sin())
}

/// SplitMix64 stream; one independent stream per `(seed, index)` key.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    fn for_index(seed: u64, idx: usize) -> Self {
        // One warm-up round decorrelates neighbouring indices.
        let mut keyed = Self {
            state: (idx as u64).rotate_left(32) ^ seed,
        };
        Self {
            state: keyed.next_u64(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn next_unit(&mut self) -> Real {
        (self.next_u64() >> 11) as Real / (1u64 << 53) as Real
    }

    /// Uniform in `[-half_width, half_width)`.
    fn next_symmetric(&mut self, half_width: Real) -> Real {
        (2.0 * self.next_unit() - 1.0) * half_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_pixel_noise_is_deterministic() {
        let noise = UniformPixelNoise {
            seed: 123,
            max_abs_px: 0.5,
        };

        let a = noise.sample(0);
        let b = noise.sample(0);
        let c = noise.sample(1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.x.abs() <= 0.5);
        assert!(a.y.abs() <= 0.5);
    }

    #[test]
    fn noise_stays_in_range_and_varies_with_seed() {
        let noise = UniformPixelNoise {
            seed: 5,
            max_abs_px: 2.0,
        };
        let other = UniformPixelNoise { seed: 6, ..noise };
        for idx in 0..64 {
            let d = noise.sample(idx);
            assert!(d.x.abs() <= 2.0 && d.y.abs() <= 2.0);
            assert_ne!(d.x, d.y);
            assert_ne!(d, other.sample(idx));
        }
    }

    #[test]
    fn zero_noise_is_identity() {
        let noise = UniformPixelNoise::default();
        let uv = Vec2::new(10.0, 20.0);
        assert_eq!(noise.apply(7, uv), uv);
    }

    #[test]
    fn unit_direction_has_unit_length() {
        for idx in 0..16 {
            let d = unit_direction(99, idx);
            assert!((d.norm() - 1.0).abs() < 1e-12);
        }
        assert_ne!(unit_direction(99, 0), unit_direction(99, 1));
    }
}
