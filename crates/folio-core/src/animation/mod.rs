#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! Everything here is advanced by explicit `Duration` deltas via
//! [`Animation::tick`]; nothing reads a wall clock. That keeps the engine
//! deterministic under test and lets the host decide the frame cadence.
//!
//! | Primitive | Use |
//! |-----------|-----|
//! | [`Easing`] | Named curves mapping linear progress to eased progress |
//! | [`Tween`] | Delay + duration + easing progress clock |
//! | [`Stagger`] | Per-item start offsets for cascades |
//! | [`SpringCurve`] | Analytic spring response used as a fixed-duration easing |
//! | [`Spring`] | Stateful spring that chases a moving target |

pub mod spring;
pub mod stagger;
pub mod tween;

use std::time::Duration;

pub use spring::{Spring, SpringCurve};
pub use stagger::Stagger;
pub use tween::Tween;

/// A time-driven value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current output. For progress clocks this is eased progress, usually in
    /// `[0.0, 1.0]` (spring easings may briefly overshoot).
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time ticked past completion, so sequenced animations can carry it over.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// `t²`
    EaseInQuad,
    /// `1 - (1-t)²`
    EaseOutQuad,
    /// `t³`
    EaseIn,
    /// `1 - (1-t)³`
    EaseOut,
    /// Cubic S-curve.
    EaseInOut,
    /// `1 - 2^(-10t)`, snapping to exactly 1.0 at the end.
    EaseOutExpo,
    /// Spring response stretched over the tween duration. May overshoot.
    Spring(SpringCurve),
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0.0, 1.0]`; both endpoints map
    /// to exactly 0.0 and 1.0.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            Self::Spring(curve) => curve.ease(t),
        }
    }

    /// Whether the curve can leave `[0.0, 1.0]` mid-flight.
    pub fn can_overshoot(&self) -> bool {
        matches!(self, Self::Spring(curve) if curve.damping_ratio() < 1.0)
    }
}

/// Linear interpolation between `from` and `to` at eased progress `p`.
#[inline]
pub fn lerp(from: f64, to: f64, p: f64) -> f64 {
    from + (to - from) * p
}
