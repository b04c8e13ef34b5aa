//! Emitter shapes that choose spawn positions for new particles.

use glam::Vec2;

use crate::error::ConfigError;
use crate::rng::ParticleRng;

/// Chooses world-space spawn positions relative to a movable origin.
///
/// Implementations must reflect the origin current at call time, with no
/// required call ordering: the engine moves the origin between successive
/// [`point`](EmitterShape::point) calls within a single update to spread
/// spawns along a fast-moving emitter's path.
pub trait EmitterShape: std::fmt::Debug + Send + Sync {
    /// Current origin in world space.
    fn origin(&self) -> Vec2;

    /// Moves the origin.
    fn set_origin(&mut self, origin: Vec2);

    /// Returns the next spawn position.
    fn point(&mut self) -> Vec2;
}

/// Circle, ring, and point emitter shape.
///
/// Each spawn picks a direction by normalizing a random point in the
/// square [-1, 1]^2 (an exactly zero sample stays zero) and a magnitude
/// uniformly between the inner and outer radius. Equal radii give a pure
/// ring; a nonzero inner radius hollows the disc out.
#[derive(Debug, Clone)]
pub struct CircleShape {
    origin: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    rng: ParticleRng,
}

impl CircleShape {
    /// Creates a circle shape. Fails if the inner radius exceeds the outer.
    pub fn new(origin: Vec2, outer_radius: f32, inner_radius: f32) -> Result<Self, ConfigError> {
        if inner_radius > outer_radius {
            return Err(ConfigError::RadiusOrder {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self {
            origin,
            inner_radius,
            outer_radius,
            rng: ParticleRng::default(),
        })
    }

    /// Degenerate circle with both radii zero; every spawn lands on the
    /// origin.
    pub fn point_source(origin: Vec2) -> Self {
        Self {
            origin,
            inner_radius: 0.0,
            outer_radius: 0.0,
            rng: ParticleRng::default(),
        }
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ParticleRng::new(seed);
        self
    }
}

impl EmitterShape for CircleShape {
    fn origin(&self) -> Vec2 {
        self.origin
    }

    fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    fn point(&mut self) -> Vec2 {
        let direction = self.rng.in_square().normalize_or_zero();
        let magnitude = self.rng.range(self.inner_radius, self.outer_radius);
        self.origin + direction * magnitude
    }
}
