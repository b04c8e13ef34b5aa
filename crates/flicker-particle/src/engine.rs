//! The particle engine: emission control, pooled storage, per-frame advance.

use std::f32::consts::TAU;
use std::fmt;

use flicker_fade::FadeCurve;
use glam::Vec2;

use crate::emitter::EmitterShape;
use crate::error::ConfigError;
use crate::particle::{Attractor, Particle, SpawnState, TextureId, TextureInfo, TextureSlot};
use crate::rng::ParticleRng;

/// Tunable emission and motion parameters.
///
/// Every field may be rewritten between [`ParticleEngine::advance`] calls
/// and takes effect on the next one. Only [`ParticleEngine::new`]
/// validates the ordering invariants; runtime writes are unchecked so a
/// host can adjust a min/max pair one field at a time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Base color of spawned particles (RGBA, 0-1).
    pub color: [f32; 4],
    /// Upper bound of the random initial speed.
    pub max_move_speed: f32,
    /// Upper bound of the random angular speed, radians per second.
    pub max_angular_speed: f32,
    /// Lower bound of the per-tick emission rate sample.
    pub min_particles_per_second: u32,
    /// Upper bound of the per-tick emission rate sample.
    pub max_particles_per_second: u32,
    /// Hard cap on the live population.
    pub max_particles: usize,
    /// Lower bound of the random time to live, seconds.
    pub min_lifetime: f32,
    /// Upper bound of the random time to live, seconds.
    pub max_lifetime: f32,
    /// Lower bound of the random size scale.
    pub min_size: f32,
    /// Upper bound of the random size scale.
    pub max_size: f32,
    /// Per-second size multiplier applied to spawns; 1.0 keeps spawned
    /// sizes constant.
    pub growth_rate: f32,
    /// Gives each spawn a random initial rotation instead of zero.
    pub random_rotation: bool,
    /// Spreads a tick's spawns along the origin's path since the last
    /// tick, so a fast-moving emitter leaves a trail, not a clump.
    pub interpolate_spawns: bool,
    /// Uniform field acceleration applied to every particle every tick.
    pub acceleration: Vec2,
    /// Velocity added to every spawn on top of its random component.
    pub directional_velocity: Vec2,
    /// Alpha curve assigned to spawns; `None` means constant 1.0.
    pub fade: Option<FadeCurve>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            max_move_speed: 1.0,
            max_angular_speed: 0.0,
            min_particles_per_second: 100,
            max_particles_per_second: 100,
            max_particles: 10000,
            min_lifetime: 1.0,
            max_lifetime: 3.0,
            min_size: 1.0,
            max_size: 1.0,
            growth_rate: 1.0,
            random_rotation: false,
            interpolate_spawns: false,
            acceleration: Vec2::ZERO,
            directional_velocity: Vec2::ZERO,
            fade: None,
        }
    }
}

/// Snapshot of engine counters for diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    /// Particles currently live.
    pub live: usize,
    /// Expired particles waiting in the recycle pool.
    pub pooled: usize,
    /// Attractors currently registered.
    pub attractors: usize,
    /// Emission rate sampled on the most recent spawning tick.
    pub current_pps: u32,
    /// Particles spawned over the engine's lifetime (including reuses).
    pub total_spawned: u64,
}

/// Per-particle draw data handed to the host renderer.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    /// Texture handle to draw with.
    pub texture: TextureId,
    /// World-space position.
    pub position: Vec2,
    /// Rotation, radians.
    pub rotation: f32,
    /// Spawn size compounded by the growth rate.
    pub size: f32,
    /// Base color with the fade curve folded into the alpha channel.
    pub color: [f32; 4],
    /// Texture center offset, the rotation/scaling pivot.
    pub origin: Vec2,
}

/// Spawns, advances, and retires particles at a movable emitter.
///
/// Particles live in an index arena: `slots` holds every particle ever
/// allocated, `live` the indices currently simulating, and `free` a LIFO
/// stack of expired indices awaiting reuse. Once the population has
/// peaked, a tick performs no allocation.
///
/// Strictly frame-synchronous: all mutation happens inside
/// [`advance`](ParticleEngine::advance), so between calls the live set is
/// stable for rendering.
#[derive(Debug)]
pub struct ParticleEngine {
    shape: Box<dyn EmitterShape>,
    /// Origin at the end of the previous advance, the interpolation anchor.
    last_origin: Vec2,
    textures: Vec<TextureSlot>,
    /// Tunable parameters; see [`EngineConfig`].
    pub config: EngineConfig,
    slots: Vec<Particle>,
    live: Vec<usize>,
    free: Vec<usize>,
    attractors: Vec<Attractor>,
    /// Spawn time not yet consumed by whole particles.
    carry: f32,
    current_pps: u32,
    total_spawned: u64,
    rng: ParticleRng,
}

impl ParticleEngine {
    /// Creates an engine over the given texture set and emitter shape.
    ///
    /// Fails if the rate, lifetime, or size bounds are out of order, the
    /// maximum rate is zero, or the texture set is empty.
    pub fn new(
        textures: &[TextureInfo],
        shape: Box<dyn EmitterShape>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        if config.min_particles_per_second > config.max_particles_per_second {
            return Err(ConfigError::RateOrder {
                min: config.min_particles_per_second,
                max: config.max_particles_per_second,
            });
        }
        if config.max_particles_per_second == 0 {
            return Err(ConfigError::RateZero);
        }
        if config.min_lifetime > config.max_lifetime {
            return Err(ConfigError::LifetimeOrder {
                min: config.min_lifetime,
                max: config.max_lifetime,
            });
        }
        if config.min_size > config.max_size {
            return Err(ConfigError::SizeOrder {
                min: config.min_size,
                max: config.max_size,
            });
        }
        if textures.is_empty() {
            return Err(ConfigError::NoTextures);
        }

        let last_origin = shape.origin();
        Ok(Self {
            shape,
            last_origin,
            textures: textures.iter().copied().map(TextureSlot::from).collect(),
            slots: Vec::with_capacity(config.max_particles),
            live: Vec::new(),
            free: Vec::new(),
            attractors: Vec::new(),
            carry: 0.0,
            current_pps: 0,
            total_spawned: 0,
            rng: ParticleRng::default(),
            config,
        })
    }

    /// Sets the engine's random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ParticleRng::new(seed);
        self
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Phases: spawn (when `should_spawn` and the population has room),
    /// then advance every live particle under the current forces, then
    /// retire expired particles into the recycle pool. A particle whose
    /// lifespan elapses this tick is pooled this tick.
    pub fn advance(&mut self, dt: f32, should_spawn: bool) {
        let origin = self.shape.origin();

        if should_spawn && self.live.len() < self.config.max_particles {
            self.carry += dt;
            // A fresh target rate every tick; the configured range is an
            // expectation, not a guarantee for any single tick.
            self.current_pps = self.rng.range(
                self.config.min_particles_per_second as f32,
                self.config.max_particles_per_second as f32,
            ) as u32;
            if self.current_pps > 0 {
                let interval = 1.0 / self.current_pps as f32;
                let count = ((self.carry / interval) as usize)
                    .min(self.config.max_particles - self.live.len());
                self.carry -= count as f32 * interval;

                if self.config.interpolate_spawns {
                    for i in 1..=count {
                        let t = i as f32 / count as f32;
                        self.shape.set_origin(self.last_origin.lerp(origin, t));
                        let position = self.shape.point();
                        self.spawn(position);
                    }
                    self.shape.set_origin(origin);
                } else {
                    for _ in 0..count {
                        let position = self.shape.point();
                        self.spawn(position);
                    }
                }
            }
        } else {
            // No backlog accumulates while spawning is off or the
            // population is at capacity.
            self.carry = 0.0;
        }

        for &index in &self.live {
            self.slots[index].advance(dt, self.config.acceleration, &self.attractors);
        }

        let slots = &self.slots;
        let free = &mut self.free;
        self.live.retain(|&index| {
            if slots[index].is_expired() {
                free.push(index);
                false
            } else {
                true
            }
        });

        self.last_origin = self.shape.origin();
    }

    /// Creates one particle at `position`, reusing a pooled slot when one
    /// is available.
    fn spawn(&mut self, position: Vec2) {
        let texture = self.textures[self.rng.index(self.textures.len())];
        let velocity = self.rng.in_square().normalize_or_zero()
            * (self.config.max_move_speed * self.rng.next_f32())
            + self.config.directional_velocity;
        let angle = if self.config.random_rotation {
            self.rng.next_f32() * TAU
        } else {
            0.0
        };
        let spawn = SpawnState {
            texture,
            position,
            velocity,
            angle,
            angular_velocity: self.rng.range(-1.0, 1.0) * self.config.max_angular_speed,
            color: self.config.color,
            size: self.rng.range(self.config.min_size, self.config.max_size),
            growth_rate: self.config.growth_rate,
            lifetime: self.rng.range(self.config.min_lifetime, self.config.max_lifetime),
            fade: self.config.fade,
        };

        match self.free.pop() {
            Some(index) => {
                self.slots[index].reset(spawn);
                self.live.push(index);
            }
            None => {
                self.slots.push(Particle::new(spawn));
                self.live.push(self.slots.len() - 1);
            }
        }
        self.total_spawned += 1;
    }

    /// Current emitter origin.
    pub fn origin(&self) -> Vec2 {
        self.shape.origin()
    }

    /// Moves the emitter origin.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.shape.set_origin(origin);
    }

    /// Registers an attractor.
    pub fn add_attractor(&mut self, attractor: Attractor) {
        self.attractors.push(attractor);
    }

    /// Removes the first attractor equal to `attractor`; a no-op when
    /// none matches.
    pub fn remove_attractor(&mut self, attractor: Attractor) {
        if let Some(index) = self.attractors.iter().position(|a| *a == attractor) {
            self.attractors.remove(index);
        }
    }

    /// Removes every attractor.
    pub fn clear_attractors(&mut self) {
        self.attractors.clear();
    }

    /// Currently registered attractors.
    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    /// Number of live particles.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of expired particles waiting for reuse.
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }

    /// Total particle slots ever allocated. Always equals
    /// [`live_count`](Self::live_count) + [`pooled_count`](Self::pooled_count).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Emission rate sampled on the most recent spawning tick.
    pub fn current_pps(&self) -> u32 {
        self.current_pps
    }

    /// Counter snapshot for diagnostics.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            live: self.live.len(),
            pooled: self.free.len(),
            attractors: self.attractors.len(),
            current_pps: self.current_pps,
            total_spawned: self.total_spawned,
        }
    }

    /// Iterates over the live particles.
    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter().map(|&index| &self.slots[index])
    }

    /// Iterates over the live particles as ready-to-draw sprites, with
    /// size and alpha evaluated at the particle's current age.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.live().map(|p| {
            let mut color = p.color;
            color[3] *= p.alpha();
            Sprite {
                texture: p.texture.id,
                position: p.position,
                rotation: p.angle,
                size: p.current_size(),
                color,
                origin: p.texture.origin,
            }
        })
    }
}

impl fmt::Display for ParticleEngine {
    /// Parameter and counter dump for on-screen diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "origin: {}", self.shape.origin())?;
        writeln!(
            f,
            "pps: {} - {} (current {})",
            self.config.min_particles_per_second,
            self.config.max_particles_per_second,
            self.current_pps
        )?;
        writeln!(f, "max particles: {}", self.config.max_particles)?;
        writeln!(
            f,
            "lifetime: {} - {}",
            self.config.min_lifetime, self.config.max_lifetime
        )?;
        writeln!(
            f,
            "size: {} - {} (growth {})",
            self.config.min_size, self.config.max_size, self.config.growth_rate
        )?;
        writeln!(f, "max move speed: {}", self.config.max_move_speed)?;
        writeln!(f, "max angular speed: {}", self.config.max_angular_speed)?;
        writeln!(f, "interpolate spawns: {}", self.config.interpolate_spawns)?;
        writeln!(
            f,
            "fade: {}",
            self.config.fade.map_or("none", FadeCurve::name)
        )?;
        writeln!(f, "acceleration: {}", self.config.acceleration)?;
        writeln!(f, "directional velocity: {}", self.config.directional_velocity)?;
        writeln!(
            f,
            "live: {}  pooled: {}  attractors: {}",
            self.live.len(),
            self.free.len(),
            self.attractors.len()
        )?;
        write!(f, "color: {:?}", self.config.color)
    }
}
