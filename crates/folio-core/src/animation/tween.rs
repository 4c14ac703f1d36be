#![forbid(unsafe_code)]

//! Progress clock for a single tween: delay, duration, easing.
//!
//! # Invariants
//!
//! 1. `value()` is 0.0 until the delay elapses and exactly 1.0 once complete.
//! 2. A zero duration completes as soon as the delay has elapsed.
//! 3. `overshoot()` is the time ticked beyond `delay + duration`.

use std::time::Duration;

use super::{Animation, Easing};

/// Eased progress over `[delay, delay + duration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    delay: Duration,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl Tween {
    /// Tween starting immediately with linear easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            easing: Easing::Linear,
            elapsed: Duration::ZERO,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the start delay (builder pattern).
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn start_delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total time from start to completion.
    #[inline]
    pub fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// Whether the delay has elapsed.
    #[inline]
    pub fn has_started(&self) -> bool {
        self.elapsed >= self.delay
    }

    /// Linear (un-eased) progress in `[0.0, 1.0]`.
    pub fn linear_progress(&self) -> f64 {
        if !self.has_started() {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let run = self.elapsed - self.delay;
        (run.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.total()
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            1.0
        } else {
            self.easing.apply(self.linear_progress())
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.total())
    }
}
