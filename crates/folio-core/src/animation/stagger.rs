#![forbid(unsafe_code)]

//! Per-item start offsets for cascading batches.

use std::time::Duration;

/// Linear stagger: item `i` starts at `start + step × i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stagger {
    pub start: Duration,
    pub step: Duration,
}

impl Stagger {
    /// Stagger beginning immediately.
    #[must_use]
    pub const fn new(step: Duration) -> Self {
        Self {
            start: Duration::ZERO,
            step,
        }
    }

    /// Shift the whole cascade by `start` (builder pattern).
    #[must_use]
    pub const fn starting_at(mut self, start: Duration) -> Self {
        self.start = start;
        self
    }

    /// Start offset of item `index`.
    pub fn offset(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.start.saturating_add(self.step.saturating_mul(index))
    }

    /// Offsets for `count` items.
    pub fn offsets(&self, count: usize) -> Vec<Duration> {
        (0..count).map(|i| self.offset(i)).collect()
    }

    /// When the last of `count` items starts.
    pub fn last_offset(&self, count: usize) -> Duration {
        count.checked_sub(1).map_or(self.start, |i| self.offset(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_60: Duration = Duration::from_millis(60);

    #[test]
    fn offsets_increase_by_step() {
        let offsets = Stagger::new(MS_60).offsets(4);
        let ms: Vec<u128> = offsets.iter().map(Duration::as_millis).collect();
        assert_eq!(ms, vec![0, 60, 120, 180]);
    }

    #[test]
    fn start_shifts_every_item() {
        let stagger = Stagger::new(MS_60).starting_at(Duration::from_millis(200));
        assert_eq!(stagger.offset(0), Duration::from_millis(200));
        assert_eq!(stagger.offset(5), Duration::from_millis(500));
    }

    #[test]
    fn empty_batch_has_no_offsets() {
        let stagger = Stagger::new(MS_60);
        assert!(stagger.offsets(0).is_empty());
        assert_eq!(stagger.last_offset(0), Duration::ZERO);
        assert_eq!(stagger.last_offset(3), Duration::from_millis(120));
    }
}
