//! Frame-synchronous 2D particle simulation core.
//!
//! Spawns, advances, ages, and retires short-lived sprite particles under
//! configurable emission, motion, and force rules. Expired particles are
//! recycled through an index arena, so steady-state ticks allocate
//! nothing. Rendering, windowing, input, and timing all stay with the
//! host: each frame it passes the elapsed seconds to
//! [`ParticleEngine::advance`] and draws whatever
//! [`ParticleEngine::sprites`] yields.
//!
//! # Example
//!
//! ```
//! use flicker_particle::{CircleShape, EngineConfig, ParticleEngine, TextureId, TextureInfo};
//! use glam::Vec2;
//!
//! let textures = [TextureInfo { id: TextureId(0), width: 8, height: 8 }];
//! let shape = CircleShape::new(Vec2::ZERO, 4.0, 0.0)?;
//! let mut engine = ParticleEngine::new(
//!     &textures,
//!     Box::new(shape),
//!     EngineConfig {
//!         min_particles_per_second: 50,
//!         max_particles_per_second: 100,
//!         ..EngineConfig::default()
//!     },
//! )?;
//!
//! engine.advance(1.0 / 60.0, true);
//! for sprite in engine.sprites() {
//!     // hand texture, position, rotation, size, and color to the renderer
//!     let _ = sprite;
//! }
//! # Ok::<(), flicker_particle::ConfigError>(())
//! ```
//!
//! The simulation is single-threaded by design: all mutation happens
//! inside `advance`, and between calls every collection is stable to
//! read. Seed the engine and shapes ([`ParticleEngine::with_seed`],
//! [`CircleShape::with_seed`]) for fully reproducible runs.

mod emitter;
mod engine;
mod error;
mod particle;
mod rng;

pub use emitter::{CircleShape, EmitterShape};
pub use engine::{EngineConfig, EngineStats, ParticleEngine, Sprite};
pub use error::ConfigError;
pub use flicker_fade as fade;
pub use flicker_fade::FadeCurve;
pub use glam;
pub use particle::{Attractor, Particle, SpawnState, TextureId, TextureInfo, TextureSlot};
pub use rng::ParticleRng;
