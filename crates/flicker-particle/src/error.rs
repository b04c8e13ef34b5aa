//! Error types for flicker-particle.

use thiserror::Error;

/// Errors raised when an engine or emitter shape is constructed with
/// inconsistent parameters.
///
/// These are the only errors in the crate: once construction succeeds,
/// every runtime operation is total. Runtime writes to
/// [`EngineConfig`](crate::EngineConfig) are deliberately unchecked so a
/// host can adjust a min/max pair one field at a time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Minimum emission rate exceeds the maximum.
    #[error("min particles per second {min} exceeds max {max}")]
    RateOrder {
        /// Configured minimum rate.
        min: u32,
        /// Configured maximum rate.
        max: u32,
    },

    /// Maximum emission rate is zero.
    #[error("max particles per second must be greater than zero")]
    RateZero,

    /// Minimum time to live exceeds the maximum.
    #[error("min lifetime {min} exceeds max {max}")]
    LifetimeOrder {
        /// Configured minimum lifetime, seconds.
        min: f32,
        /// Configured maximum lifetime, seconds.
        max: f32,
    },

    /// Minimum size scale exceeds the maximum.
    #[error("min size {min} exceeds max {max}")]
    SizeOrder {
        /// Configured minimum size scale.
        min: f32,
        /// Configured maximum size scale.
        max: f32,
    },

    /// Emitter inner radius exceeds the outer radius.
    #[error("inner radius {inner} exceeds outer radius {outer}")]
    RadiusOrder {
        /// Configured inner radius.
        inner: f32,
        /// Configured outer radius.
        outer: f32,
    },

    /// Engine constructed with no textures to assign to spawns.
    #[error("texture set is empty")]
    NoTextures,
}
