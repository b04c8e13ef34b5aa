//! A single simulated particle and its force integrator.

use flicker_fade::FadeCurve;
use glam::Vec2;

/// Opaque handle to an externally owned texture.
///
/// The engine never touches pixel data; it only carries the handle
/// through to the render output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureId(pub u32);

/// Texture description supplied by the host at engine construction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureInfo {
    /// Host-side handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Engine-side texture entry: the handle plus its center offset.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureSlot {
    /// Host-side handle.
    pub id: TextureId,
    /// Geometric center of the texture, the rotation/scaling pivot.
    pub origin: Vec2,
}

impl From<TextureInfo> for TextureSlot {
    fn from(info: TextureInfo) -> Self {
        Self {
            id: info.id,
            origin: Vec2::new(info.width as f32 / 2.0, info.height as f32 / 2.0),
        }
    }
}

/// Point force source pulling particles toward it.
///
/// The pull falls off linearly with distance: full `force` at the
/// attractor, zero at `max_distance`, and a hard cutoff (no contribution
/// at all) beyond it. Deliberately not an inverse-square law.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attractor {
    /// World-space position.
    pub position: Vec2,
    /// Acceleration magnitude at zero distance.
    pub force: f32,
    /// Distance beyond which the attractor contributes nothing.
    pub max_distance: f32,
}

impl Attractor {
    /// Acceleration magnitude felt at the given distance.
    pub fn strength_at(&self, distance: f32) -> f32 {
        if distance > self.max_distance {
            0.0
        } else {
            self.force * (1.0 - distance / self.max_distance)
        }
    }
}

/// Full parameter set for a spawned particle.
///
/// A recycled particle is reset from one of these in a single step, so
/// nothing from its previous life survives.
#[derive(Debug, Clone, Copy)]
pub struct SpawnState {
    /// Texture entry to render with.
    pub texture: TextureSlot,
    /// Initial world-space position.
    pub position: Vec2,
    /// Initial velocity, units per second.
    pub velocity: Vec2,
    /// Initial rotation, radians.
    pub angle: f32,
    /// Rotation speed, radians per second.
    pub angular_velocity: f32,
    /// Base color (RGBA, 0-1).
    pub color: [f32; 4],
    /// Base size scale.
    pub size: f32,
    /// Per-second size multiplier; 1.0 keeps the size constant.
    pub growth_rate: f32,
    /// Time to live, seconds.
    pub lifetime: f32,
    /// Alpha curve; `None` means constant 1.0.
    pub fade: Option<FadeCurve>,
}

/// A single simulated sprite particle.
///
/// Owned by the engine's slot arena; at any moment a particle belongs to
/// exactly one of the live set or the recycle pool.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Texture entry to render with.
    pub texture: TextureSlot,
    /// World-space position.
    pub position: Vec2,
    /// Velocity, units per second.
    pub velocity: Vec2,
    /// Rotation, radians.
    pub angle: f32,
    /// Rotation speed, radians per second.
    pub angular_velocity: f32,
    /// Base color (RGBA, 0-1).
    pub color: [f32; 4],
    /// Base size scale at spawn.
    pub size: f32,
    /// Per-second size multiplier.
    pub growth_rate: f32,
    /// Time to live, seconds.
    pub lifetime: f32,
    /// Seconds lived so far.
    pub age: f32,
    /// Alpha curve; `None` means constant 1.0.
    pub fade: Option<FadeCurve>,
}

impl Particle {
    /// Creates a new particle from a full spawn parameter set.
    pub fn new(spawn: SpawnState) -> Self {
        Self {
            texture: spawn.texture,
            position: spawn.position,
            velocity: spawn.velocity,
            angle: spawn.angle,
            angular_velocity: spawn.angular_velocity,
            color: spawn.color,
            size: spawn.size,
            growth_rate: spawn.growth_rate,
            lifetime: spawn.lifetime,
            age: 0.0,
            fade: spawn.fade,
        }
    }

    /// Reinitializes a recycled particle in place.
    pub fn reset(&mut self, spawn: SpawnState) {
        *self = Self::new(spawn);
    }

    /// True once the particle has lived out its time to live.
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Fraction of the lifespan that has passed (0 at spawn, 1 at expiry).
    pub fn lifespan_fraction(&self) -> f32 {
        self.age / self.lifetime
    }

    /// Current opacity multiplier from the assigned fade curve.
    pub fn alpha(&self) -> f32 {
        match self.fade {
            Some(curve) => curve.apply(self.lifespan_fraction()),
            None => 1.0,
        }
    }

    /// Current size: the spawn size compounded by the growth rate, so a
    /// rate of 2.0 doubles the size every second (smoothly).
    pub fn current_size(&self) -> f32 {
        self.size * self.growth_rate.powf(self.age)
    }

    /// Integrates one step under the uniform field and attractor forces.
    ///
    /// Velocity receives half the step's acceleration before the position
    /// moves and half after, so the position advances by the average of
    /// the old and new velocity (second-order accurate under constant
    /// acceleration). A particle sitting exactly on an attractor has no
    /// pull direction and is left unaccelerated by it for that step.
    pub fn advance(&mut self, dt: f32, uniform_accel: Vec2, attractors: &[Attractor]) {
        let mut accel = uniform_accel;
        for attractor in attractors {
            let to_attractor = attractor.position - self.position;
            let dist_sq = to_attractor.length_squared();
            if dist_sq <= attractor.max_distance * attractor.max_distance {
                let dist = dist_sq.sqrt();
                if dist > 0.0 {
                    accel += to_attractor / dist * attractor.strength_at(dist);
                }
            }
        }

        let half_kick = accel * dt / 2.0;
        self.velocity += half_kick;
        self.position += self.velocity * dt;
        self.velocity += half_kick;

        self.angle += self.angular_velocity * dt;
        self.age += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_at(position: Vec2) -> SpawnState {
        SpawnState {
            texture: TextureSlot {
                id: TextureId(0),
                origin: Vec2::ZERO,
            },
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            color: [1.0, 1.0, 1.0, 1.0],
            size: 1.0,
            growth_rate: 1.0,
            lifetime: 1.0,
            fade: None,
        }
    }

    #[test]
    fn texture_origin_is_geometric_center() {
        let slot = TextureSlot::from(TextureInfo {
            id: TextureId(3),
            width: 4,
            height: 8,
        });
        assert_eq!(slot.origin, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn expires_exactly_on_fourth_half_second_tick() {
        let mut p = Particle::new(SpawnState {
            lifetime: 2.0,
            ..spawn_at(Vec2::ZERO)
        });
        for _ in 0..3 {
            p.advance(0.5, Vec2::ZERO, &[]);
            assert!(!p.is_expired());
        }
        p.advance(0.5, Vec2::ZERO, &[]);
        assert!(p.is_expired());
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut p = Particle::new(SpawnState {
            velocity: Vec2::new(3.0, 0.0),
            angular_velocity: 1.0,
            ..spawn_at(Vec2::new(1.0, 1.0))
        });
        p.advance(0.0, Vec2::new(0.0, -9.8), &[]);
        assert_eq!(p.position, Vec2::new(1.0, 1.0));
        assert_eq!(p.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.age, 0.0);
    }

    #[test]
    fn trapezoidal_step_moves_by_average_velocity() {
        // From rest under constant acceleration a for one step of dt,
        // the position must advance by a*dt^2/2 and velocity by a*dt.
        let mut p = Particle::new(spawn_at(Vec2::ZERO));
        p.advance(2.0, Vec2::new(1.0, 0.0), &[]);
        assert!((p.position.x - 2.0).abs() < 1e-5);
        assert!((p.velocity.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn attractor_beyond_max_distance_contributes_nothing() {
        let attractor = Attractor {
            position: Vec2::new(100.0, 0.0),
            force: 50.0,
            max_distance: 10.0,
        };
        let mut p = Particle::new(spawn_at(Vec2::ZERO));
        p.advance(0.5, Vec2::ZERO, &[attractor]);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn attractor_strength_is_linear_in_distance() {
        let attractor = Attractor {
            position: Vec2::ZERO,
            force: 50.0,
            max_distance: 10.0,
        };
        assert_eq!(attractor.strength_at(0.0), 50.0);
        assert!((attractor.strength_at(5.0) - 25.0).abs() < 1e-5);
        assert_eq!(attractor.strength_at(10.0), 0.0);
        assert_eq!(attractor.strength_at(10.1), 0.0);
    }

    #[test]
    fn particle_exactly_on_an_attractor_stays_put() {
        // Zero distance has no pull direction: the step must stay finite
        // and leave the particle where it is, even though the force law
        // itself reports full strength there.
        let attractor = Attractor {
            position: Vec2::new(2.0, 3.0),
            force: 50.0,
            max_distance: 10.0,
        };
        let mut p = Particle::new(spawn_at(Vec2::new(2.0, 3.0)));
        p.advance(0.5, Vec2::ZERO, &[attractor]);
        assert!(p.position.is_finite());
        assert!(p.velocity.is_finite());
        assert_eq!(p.position, Vec2::new(2.0, 3.0));
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(attractor.strength_at(0.0), 50.0);
    }

    #[test]
    fn attractor_pulls_toward_its_position() {
        let attractor = Attractor {
            position: Vec2::new(5.0, 0.0),
            force: 10.0,
            max_distance: 100.0,
        };
        let mut p = Particle::new(spawn_at(Vec2::ZERO));
        p.advance(0.1, Vec2::ZERO, &[attractor]);
        assert!(p.velocity.x > 0.0);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn alpha_defaults_to_one_without_a_curve() {
        let mut p = Particle::new(spawn_at(Vec2::ZERO));
        p.advance(0.5, Vec2::ZERO, &[]);
        assert_eq!(p.alpha(), 1.0);
    }

    #[test]
    fn alpha_follows_the_assigned_curve() {
        let mut p = Particle::new(SpawnState {
            lifetime: 2.0,
            fade: Some(FadeCurve::LinearOut),
            ..spawn_at(Vec2::ZERO)
        });
        p.advance(0.5, Vec2::ZERO, &[]);
        assert!((p.alpha() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn size_grows_exponentially() {
        let mut p = Particle::new(SpawnState {
            size: 3.0,
            growth_rate: 2.0,
            lifetime: 10.0,
            ..spawn_at(Vec2::ZERO)
        });
        assert_eq!(p.current_size(), 3.0);
        p.advance(1.0, Vec2::ZERO, &[]);
        assert!((p.current_size() - 6.0).abs() < 1e-4);
        p.advance(1.0, Vec2::ZERO, &[]);
        assert!((p.current_size() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn reset_leaves_no_trace_of_the_prior_life() {
        let mut p = Particle::new(SpawnState {
            fade: Some(FadeCurve::SigmoidOut),
            angular_velocity: 3.0,
            ..spawn_at(Vec2::new(9.0, 9.0))
        });
        p.advance(0.7, Vec2::new(0.0, -9.8), &[]);

        p.reset(spawn_at(Vec2::ZERO));
        assert_eq!(p.age, 0.0);
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.fade, None);
        assert_eq!(p.alpha(), 1.0);
    }
}
