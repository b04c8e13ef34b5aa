//! Alpha fade curves for particle lifespans.
//!
//! Each curve is a pure function from a particle's lifespan fraction
//! (0 at spawn, 1 at expiry) to an opacity multiplier. The particle
//! engine assigns a curve per particle; "no curve" simply means a
//! constant alpha of 1.0 and is represented with `Option::None` at the
//! consumer, so there is no identity variant here.
//!
//! ```
//! use flicker_fade::FadeCurve;
//!
//! let curve = FadeCurve::InThenOut;
//! assert!((curve.apply(0.5) - 1.0).abs() < 1e-6);
//! assert!(curve.apply(0.0).abs() < 1e-6);
//! ```
//!
//! Curves are not all confined to [0, 1]: [`quick_then_slow`] diverges
//! as the fraction approaches zero. That is part of its contract and is
//! deliberately not clamped; see the function docs.

use std::f32::consts::PI;

/// Fade function type.
pub type FadeFn = fn(f32) -> f32;

/// Number of full fade-in/fade-out cycles in the pulsing curves.
const PULSE_COUNT: f32 = 5.0;

/// The fixed set of fade curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FadeCurve {
    /// Fade out linearly over the lifespan.
    #[default]
    LinearOut,
    /// Fade out along an S-curve: slow, then fast, then slow.
    SigmoidOut,
    /// Fade out quickly at first, then linger at low alpha.
    QuickThenSlow,
    /// Fade from invisible to full alpha at mid-life and back (quadratic).
    InThenOut,
    /// Fade from invisible to half alpha at mid-life and back (quadratic).
    HalfInThenOut,
    /// Fade in and out repeatedly over the lifespan.
    Pulse,
    /// Pulse that stays fully invisible between fades.
    HalfPulse,
}

impl FadeCurve {
    /// Every curve, in a stable order.
    pub const ALL: [FadeCurve; 7] = [
        FadeCurve::LinearOut,
        FadeCurve::SigmoidOut,
        FadeCurve::QuickThenSlow,
        FadeCurve::InThenOut,
        FadeCurve::HalfInThenOut,
        FadeCurve::Pulse,
        FadeCurve::HalfPulse,
    ];

    /// Evaluates the curve at lifespan fraction t (0-1).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            FadeCurve::LinearOut => linear_out(t),
            FadeCurve::SigmoidOut => sigmoid_out(t),
            FadeCurve::QuickThenSlow => quick_then_slow(t),
            FadeCurve::InThenOut => in_then_out(t),
            FadeCurve::HalfInThenOut => half_in_then_out(t),
            FadeCurve::Pulse => pulse(t),
            FadeCurve::HalfPulse => half_pulse(t),
        }
    }

    /// Returns the corresponding function pointer.
    pub fn as_fn(self) -> FadeFn {
        match self {
            FadeCurve::LinearOut => linear_out,
            FadeCurve::SigmoidOut => sigmoid_out,
            FadeCurve::QuickThenSlow => quick_then_slow,
            FadeCurve::InThenOut => in_then_out,
            FadeCurve::HalfInThenOut => half_in_then_out,
            FadeCurve::Pulse => pulse,
            FadeCurve::HalfPulse => half_pulse,
        }
    }

    /// Curve name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            FadeCurve::LinearOut => "linear_out",
            FadeCurve::SigmoidOut => "sigmoid_out",
            FadeCurve::QuickThenSlow => "quick_then_slow",
            FadeCurve::InThenOut => "in_then_out",
            FadeCurve::HalfInThenOut => "half_in_then_out",
            FadeCurve::Pulse => "pulse",
            FadeCurve::HalfPulse => "half_pulse",
        }
    }
}

/// Fade out linearly: `1 - t`.
#[inline]
pub fn linear_out(t: f32) -> f32 {
    1.0 - t
}

/// Fade out along a normalized sigmoid: `1 - 1/(1 + e^(-12t + 6))`.
#[inline]
pub fn sigmoid_out(t: f32) -> f32 {
    1.0 - 1.0 / (1.0 + (-12.0 * t + 6.0).exp())
}

/// Fade out quickly, then linger: `-0.1 * log10(t)`.
///
/// Diverges to +infinity as t approaches 0 (and is exactly +infinity at
/// t = 0). Callers that feed a fraction near zero get an unbounded
/// multiplier; this is the documented shape of the curve, not clamped
/// here, since consumers key their visuals to the exact values.
#[inline]
pub fn quick_then_slow(t: f32) -> f32 {
    -0.1 * t.log10()
}

/// Fade in to full alpha at mid-life, then out: `-4(t - 0.5)^2 + 1`.
#[inline]
pub fn in_then_out(t: f32) -> f32 {
    -4.0 * (t - 0.5) * (t - 0.5) + 1.0
}

/// Fade in to half alpha at mid-life, then out: `-2(t - 0.5)^2 + 0.5`.
#[inline]
pub fn half_in_then_out(t: f32) -> f32 {
    -2.0 * (t - 0.5) * (t - 0.5) + 0.5
}

/// Fade in and out five times: `0.5 sin(2*pi*5*t) + 0.5`.
#[inline]
pub fn pulse(t: f32) -> f32 {
    0.5 * (PI * PULSE_COUNT * 2.0 * t).sin() + 0.5
}

/// Pulse five times, invisible between fades: `max(0, sin(2*pi*5*t))`.
#[inline]
pub fn half_pulse(t: f32) -> f32 {
    (PI * PULSE_COUNT * 2.0 * t).sin().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_out_endpoints() {
        assert!((linear_out(0.0) - 1.0).abs() < 1e-6);
        assert!(linear_out(1.0).abs() < 1e-6);
    }

    #[test]
    fn sigmoid_out_shape() {
        // Near-full at spawn, near-zero at expiry, exactly half at mid-life.
        assert!(sigmoid_out(0.0) > 0.99);
        assert!(sigmoid_out(1.0) < 0.01);
        assert!((sigmoid_out(0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn quick_then_slow_diverges_at_zero() {
        let at_zero = quick_then_slow(0.0);
        assert!(at_zero.is_infinite() && at_zero > 0.0);
        assert!(quick_then_slow(1e-6) > 0.5);
        assert!(quick_then_slow(1.0).abs() < 1e-6);
    }

    #[test]
    fn in_then_out_peaks_at_midlife() {
        assert!((in_then_out(0.5) - 1.0).abs() < 1e-6);
        assert!(in_then_out(0.0).abs() < 1e-6);
        assert!(in_then_out(1.0).abs() < 1e-6);
    }

    #[test]
    fn half_in_then_out_peaks_at_half_alpha() {
        assert!((half_in_then_out(0.5) - 0.5).abs() < 1e-6);
        assert!(half_in_then_out(0.0).abs() < 1e-6);
        assert!(half_in_then_out(1.0).abs() < 1e-6);
    }

    #[test]
    fn pulse_starts_at_half() {
        assert!((pulse(0.0) - 0.5).abs() < 1e-6);
        // One full cycle every fifth of the lifespan.
        assert!((pulse(0.2) - 0.5).abs() < 1e-5);
        assert!((pulse(0.05) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn half_pulse_rests_at_zero() {
        assert!(half_pulse(0.0).abs() < 1e-6);
        // Second half of each cycle is clamped to invisible.
        assert!(half_pulse(0.15).abs() < 1e-5);
        assert!((half_pulse(0.05) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn apply_matches_free_functions() {
        for curve in FadeCurve::ALL {
            for t in [0.1, 0.25, 0.5, 0.75, 1.0] {
                assert_eq!(curve.apply(t), (curve.as_fn())(t), "{}", curve.name());
            }
        }
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in FadeCurve::ALL.iter().enumerate() {
            for b in &FadeCurve::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
