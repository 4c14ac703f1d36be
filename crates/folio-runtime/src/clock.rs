#![forbid(unsafe_code)]

//! Frame clock: converts host timestamps into capped frame deltas.
//!
//! Hosts that run on a real animation-frame loop feed `Instant`s here and
//! pass the resulting deltas to the page. A tab that was backgrounded for a
//! minute produces one capped delta, not a minute of animation in a frame.

use std::time::Duration;

use web_time::Instant;

/// Largest delta handed out for a single frame.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            max_delta: MAX_FRAME_DELTA,
        }
    }

    /// Override the per-frame cap (builder pattern).
    #[must_use]
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Delta since the previous call, using the current time.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Delta since the previous call. The first call returns zero; a clock
    /// that went backwards also yields zero.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .and_then(|last| now.checked_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt.min(self.max_delta)
    }

    /// Forget the previous timestamp, e.g. after the page was hidden.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn deltas_are_capped() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        assert_eq!(clock.tick_at(start + Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(clock.tick_at(start + Duration::from_secs(60)), MAX_FRAME_DELTA);
    }

    #[test]
    fn reset_forgets_last_frame() {
        let mut clock = FrameClock::new().with_max_delta(Duration::from_secs(10));
        let start = Instant::now();
        clock.tick_at(start);
        clock.reset();
        assert_eq!(clock.tick_at(start + Duration::from_secs(1)), Duration::ZERO);
    }
}
