#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) motion.
//!
//! Two forms are provided:
//!
//! - [`SpringCurve`]: the closed-form step response of a unit spring, used as
//!   an [`Easing`](super::Easing) stretched over a fixed tween duration. The
//!   curve is sampled up to its settle time, so progress 1.0 always lands
//!   exactly on the target.
//! - [`Spring`]: a stateful integrator that chases a target which may move
//!   every frame (magnetic buttons).
//!
//! Both use the classical equation
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag.
//!   - Underdamped (c < 2√(k·m)): oscillates past target before settling
//!   - Critically damped (c = 2√(k·m)): fastest convergence without overshoot
//!   - Overdamped (c > 2√(k·m)): slow convergence, no overshoot
//!
//! # Failure Modes
//!
//! - Zero stiffness or mass: clamped to a minimum so the curve converges.
//! - Very large dt on [`Spring`]: subdivided into 4ms steps for stability.

use std::sync::LazyLock;
use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which a spring is considered at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (with the position threshold) a spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.01;

/// Sampling step used to find the settle time of a curve.
const SETTLE_STEP_SECS: f64 = 0.001;
/// Upper bound on the settle search.
const SETTLE_LIMIT_SECS: f64 = 10.0;

/// Presets, built on first use.
static CRITICAL: LazyLock<SpringCurve> = LazyLock::new(|| {
    let k: f64 = 170.0;
    SpringCurve::new(k, 2.0 * k.sqrt(), 1.0)
});
static BOUNCY: LazyLock<SpringCurve> = LazyLock::new(|| SpringCurve::new(100.0, 10.0, 1.0));

// ---------------------------------------------------------------------------
// SpringCurve
// ---------------------------------------------------------------------------

/// Closed-form spring response from 0 to 1, usable as an easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringCurve {
    stiffness: f64,
    damping: f64,
    mass: f64,
    /// Seconds until the response stays within the rest threshold.
    settle_secs: f64,
}

impl SpringCurve {
    /// Build a curve. Stiffness and mass are clamped to small positive
    /// minimums, damping to non-negative.
    #[must_use]
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        let mut curve = Self {
            stiffness: stiffness.max(MIN_STIFFNESS),
            damping: damping.max(0.0),
            mass: mass.max(MIN_MASS),
            settle_secs: SETTLE_LIMIT_SECS,
        };
        curve.settle_secs = curve.find_settle_time();
        curve
    }

    /// Critically damped spring: fastest convergence without overshoot.
    #[must_use]
    pub fn critical() -> Self {
        *CRITICAL
    }

    /// Underdamped spring with a visible settle, used for the modal morph.
    #[must_use]
    pub fn bouncy() -> Self {
        *BOUNCY
    }

    /// Undamped natural frequency ω₀ = √(k/m).
    #[inline]
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio ζ = c / (2√(k·m)).
    #[inline]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Seconds of physical time the curve is stretched over.
    #[inline]
    pub fn settle_secs(&self) -> f64 {
        self.settle_secs
    }

    /// Step response at physical time `t` seconds.
    pub fn position_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-6 {
            1.0 - (1.0 + w0 * t) * (-w0 * t).exp()
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            1.0 - envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// Eased value at normalized progress `p`.
    pub fn ease(&self, p: f64) -> f64 {
        if p <= 0.0 {
            0.0
        } else if p >= 1.0 {
            1.0
        } else {
            self.position_at(p * self.settle_secs)
        }
    }

    fn find_settle_time(&self) -> f64 {
        let mut last_outside = 0.0;
        let mut t = 0.0;
        while t < SETTLE_LIMIT_SECS {
            t += SETTLE_STEP_SECS;
            if (1.0 - self.position_at(t)).abs() > DEFAULT_REST_THRESHOLD {
                last_outside = t;
            }
        }
        (last_outside + SETTLE_STEP_SECS).min(SETTLE_LIMIT_SECS)
    }
}

// ---------------------------------------------------------------------------
// Spring
// ---------------------------------------------------------------------------

/// A damped harmonic oscillator chasing a (possibly moving) target.
///
/// ```ignore
/// use std::time::Duration;
/// use folio_core::animation::Spring;
///
/// let mut spring = Spring::new(0.0, 12.0);
/// for _ in 0..120 {
///     spring.advance(Duration::from_millis(16));
/// }
/// assert!((spring.position() - 12.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring at `initial` targeting `target`.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            at_rest: (initial - target).abs() < DEFAULT_REST_THRESHOLD,
        }
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > DEFAULT_REST_THRESHOLD {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < DEFAULT_REST_THRESHOLD
            && self.velocity.abs() < DEFAULT_VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Raw position; springs here drive pixel offsets, not progress.
    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = (self.initial - self.target).abs() < DEFAULT_REST_THRESHOLD;
    }
}
