//! Seedable random number generation for the simulation.
//!
//! Every component that randomizes (the engine, each emitter shape) owns
//! its own generator, so a fixed seed reproduces an entire run.

use glam::Vec2;

/// Simple random number generator for particle systems.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleRng {
    state: u64,
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl ParticleRng {
    /// Creates a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Returns a random u64.
    fn next_u64(&mut self) -> u64 {
        // xorshift64
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a random f32 in [0, 1]. The top of the range is reachable:
    /// a u64 within 2^39 of the maximum rounds to 2^64 in f32.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() as f32) / (u64::MAX as f32)
    }

    /// Returns a random f32 in [min, max].
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a random point in the square [-1, 1]^2.
    pub fn in_square(&mut self) -> Vec2 {
        Vec2::new(self.range(-1.0, 1.0), self.range(-1.0, 1.0))
    }

    /// Returns a random index in [0, len). `len` must be nonzero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_f32_in_unit_range() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..100 {
            let v = rng.next_f32();
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn range_respects_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..100 {
            let v = rng.range(5.0, 10.0);
            assert!((5.0..=10.0).contains(&v));
        }
    }

    #[test]
    fn range_with_equal_bounds_is_constant() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..10 {
            assert_eq!(rng.range(3.0, 3.0), 3.0);
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn in_square_stays_in_square() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..100 {
            let p = rng.in_square();
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0);
        }
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            assert!(rng.index(3) < 3);
        }
    }
}
