#![forbid(unsafe_code)]

//! Cross-fading profile images: the `active` class moves to the next image
//! on a fixed interval. The fade itself is CSS.

use std::time::Duration;

use folio_runtime::{ElementId, Surface};

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone)]
pub struct ImageCycler {
    images: Vec<ElementId>,
    current: usize,
    interval: Duration,
    elapsed: Duration,
}

impl ImageCycler {
    /// The image already marked active (or the first) is current.
    pub fn new<S: Surface + ?Sized>(images: Vec<ElementId>, interval: Duration, surface: &S) -> Self {
        let current = images
            .iter()
            .position(|&el| surface.has_class(el, ACTIVE_CLASS))
            .unwrap_or(0);
        Self {
            images,
            current,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Fewer than two images never cycle.
    pub fn is_inert(&self) -> bool {
        self.images.len() < 2 || self.interval.is_zero()
    }

    pub fn current(&self) -> Option<ElementId> {
        self.images.get(self.current).copied()
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, dt: Duration, surface: &mut S) {
        if self.is_inert() {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            surface.set_class(self.images[self.current], ACTIVE_CLASS, false);
            self.current = (self.current + 1) % self.images.len();
            surface.set_class(self.images[self.current], ACTIVE_CLASS, true);
        }
    }
}
