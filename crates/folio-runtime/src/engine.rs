#![forbid(unsafe_code)]

//! Tween engine: batched, staggered style animation over a [`Surface`].
//!
//! A [`TweenSpec`] names a set of target elements, the properties to drive,
//! and the timing. [`TweenEngine::start`] turns it into one running tween
//! per element (a *batch*) and returns its [`TweenId`].
//!
//! # Invariants
//!
//! 1. `from` values are written to the surface when the batch starts, even
//!    for staggered elements still waiting on their delay.
//! 2. Starting a tween on an element cancels any running tween on that
//!    element that drives at least one of the same properties.
//! 3. Every element of a batch produces exactly one
//!    [`TweenEvent::ElementDone`], and every batch exactly one
//!    [`TweenEvent::BatchDone`], whether it finished or was cancelled.
//! 4. Events are delivered by the next [`TweenEngine::tick`], in the order
//!    they occurred.
//! 5. A finished tween leaves exactly its `to` values; a cancelled one leaves
//!    whatever values it last wrote.
//!
//! # Failure Modes
//!
//! - Unknown target elements are skipped with a `warn` event.
//! - A batch with no live targets completes on the next tick.

use std::time::Duration;

use ahash::{AHashMap, AHashSet};
use folio_core::animation::{Animation, Easing, Stagger, Tween, lerp};
use folio_core::style::StyleProp;
use tracing::{trace, warn};

use crate::surface::{ElementId, Surface};

/// Handle to a started batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

impl TweenId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One animated property. A missing `from` is read from the surface at start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub prop: StyleProp,
    pub from: Option<f64>,
    pub to: f64,
}

/// Description of a batch of tweens.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub targets: Vec<ElementId>,
    pub tracks: Vec<Track>,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
    pub stagger: Option<Duration>,
    pub label: &'static str,
}

impl TweenSpec {
    /// Linear, undelayed batch over `targets`.
    #[must_use]
    pub fn new(targets: impl IntoIterator<Item = ElementId>, duration: Duration) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            tracks: Vec::new(),
            duration,
            delay: Duration::ZERO,
            easing: Easing::Linear,
            stagger: None,
            label: "tween",
        }
    }

    /// Animate `prop` from an explicit start value.
    #[must_use]
    pub fn track(mut self, prop: StyleProp, from: f64, to: f64) -> Self {
        self.tracks.push(Track {
            prop,
            from: Some(from),
            to,
        });
        self
    }

    /// Animate `prop` from its current value.
    #[must_use]
    pub fn to(mut self, prop: StyleProp, to: f64) -> Self {
        self.tracks.push(Track {
            prop,
            from: None,
            to,
        });
        self
    }

    /// Uniform scale from an explicit start value.
    #[must_use]
    pub fn scale(self, from: f64, to: f64) -> Self {
        self.track(StyleProp::ScaleX, from, to)
            .track(StyleProp::ScaleY, from, to)
    }

    /// Uniform scale from the current value.
    #[must_use]
    pub fn scale_to(self, to: f64) -> Self {
        self.to(StyleProp::ScaleX, to).to(StyleProp::ScaleY, to)
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Offset each successive target's start by `step`.
    #[must_use]
    pub fn stagger(mut self, step: Duration) -> Self {
        self.stagger = Some(step);
        self
    }

    /// Name used in log events.
    #[must_use]
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    fn start_offset(&self, index: usize) -> Duration {
        Stagger::new(self.stagger.unwrap_or(Duration::ZERO))
            .starting_at(self.delay)
            .offset(index)
    }
}

/// Completion notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEvent {
    /// One element of a batch finished or was cancelled.
    ElementDone {
        batch: TweenId,
        element: ElementId,
        cancelled: bool,
    },
    /// Every element of the batch is done. `cancelled` is set if any element
    /// was cancelled.
    BatchDone { batch: TweenId, cancelled: bool },
}

impl TweenEvent {
    #[inline]
    pub fn batch(&self) -> TweenId {
        match *self {
            Self::ElementDone { batch, .. } | Self::BatchDone { batch, .. } => batch,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedTrack {
    prop: StyleProp,
    from: f64,
    to: f64,
}

#[derive(Debug, Clone)]
struct ActiveTween {
    batch: TweenId,
    element: ElementId,
    tracks: Vec<ResolvedTrack>,
    clock: Tween,
}

impl ActiveTween {
    fn drives_any(&self, props: &[StyleProp]) -> bool {
        self.tracks.iter().any(|t| props.contains(&t.prop))
    }
}

#[derive(Debug, Clone, Copy)]
struct BatchState {
    remaining: usize,
    cancelled: bool,
    label: &'static str,
}

/// Runs tween batches against a surface.
#[derive(Debug, Default)]
pub struct TweenEngine {
    next_id: u64,
    active: Vec<ActiveTween>,
    batches: AHashMap<TweenId, BatchState>,
    pending: Vec<TweenEvent>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a batch. `from` values are applied immediately.
    pub fn start<S: Surface + ?Sized>(&mut self, spec: TweenSpec, surface: &mut S) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        let props: Vec<StyleProp> = spec.tracks.iter().map(|t| t.prop).collect();
        let mut seen = AHashSet::with_capacity(spec.targets.len());
        let mut started = Vec::with_capacity(spec.targets.len());

        for (index, &element) in spec.targets.iter().enumerate() {
            if !seen.insert(element) {
                continue;
            }
            if !surface.contains(element) {
                warn!(label = spec.label, %element, "tween target missing; skipped");
                continue;
            }
            self.cancel_where(|t| t.element == element && t.drives_any(&props));

            let tracks: Vec<ResolvedTrack> = spec
                .tracks
                .iter()
                .map(|track| ResolvedTrack {
                    prop: track.prop,
                    from: track.from.unwrap_or_else(|| surface.style(element, track.prop)),
                    to: track.to,
                })
                .collect();
            for track in &tracks {
                surface.set_style(element, track.prop, track.from);
            }

            let clock = Tween::new(spec.duration)
                .delay(spec.start_offset(index))
                .easing(spec.easing);
            started.push(ActiveTween {
                batch: id,
                element,
                tracks,
                clock,
            });
        }

        trace!(
            batch = id.0,
            label = spec.label,
            targets = started.len(),
            duration_ms = spec.duration.as_millis() as u64,
            "tween batch started"
        );

        if started.is_empty() {
            self.pending.push(TweenEvent::BatchDone {
                batch: id,
                cancelled: false,
            });
        } else {
            self.batches.insert(
                id,
                BatchState {
                    remaining: started.len(),
                    cancelled: false,
                    label: spec.label,
                },
            );
            self.active.extend(started);
        }
        id
    }

    /// Advance every running tween and return all events since the last tick.
    pub fn tick<S: Surface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> Vec<TweenEvent> {
        let active = std::mem::take(&mut self.active);
        for mut tween in active {
            tween.clock.tick(dt);
            if tween.clock.is_complete() {
                for track in &tween.tracks {
                    surface.set_style(tween.element, track.prop, track.to);
                }
                self.finish(tween.batch, tween.element, false);
            } else {
                let p = tween.clock.value();
                for track in &tween.tracks {
                    surface.set_style(tween.element, track.prop, lerp(track.from, track.to, p));
                }
                self.active.push(tween);
            }
        }
        std::mem::take(&mut self.pending)
    }

    /// Cancel every running tween on `element`. Styles stay where they are.
    pub fn cancel_element(&mut self, element: ElementId) -> usize {
        self.cancel_where(|t| t.element == element)
    }

    /// Cancel whatever is left of a batch.
    pub fn cancel_batch(&mut self, batch: TweenId) -> usize {
        self.cancel_where(|t| t.batch == batch)
    }

    /// Whether nothing is running and no events are waiting.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.pending.is_empty()
    }

    /// Whether any tween is running on `element`.
    pub fn is_animating(&self, element: ElementId) -> bool {
        self.active.iter().any(|t| t.element == element)
    }

    /// Whether the batch still has running elements.
    pub fn is_batch_active(&self, batch: TweenId) -> bool {
        self.batches.contains_key(&batch)
    }

    /// Number of running per-element tweens.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn cancel_where(&mut self, mut pred: impl FnMut(&ActiveTween) -> bool) -> usize {
        let active = std::mem::take(&mut self.active);
        let mut cancelled = 0;
        for tween in active {
            if pred(&tween) {
                self.finish(tween.batch, tween.element, true);
                cancelled += 1;
            } else {
                self.active.push(tween);
            }
        }
        cancelled
    }

    fn finish(&mut self, batch: TweenId, element: ElementId, cancelled: bool) {
        self.pending.push(TweenEvent::ElementDone {
            batch,
            element,
            cancelled,
        });
        let Some(state) = self.batches.get_mut(&batch) else {
            return;
        };
        state.remaining = state.remaining.saturating_sub(1);
        state.cancelled |= cancelled;
        if state.remaining == 0 {
            let done = *state;
            self.batches.remove(&batch);
            trace!(batch = batch.0, label = done.label, cancelled = done.cancelled, "tween batch done");
            self.pending.push(TweenEvent::BatchDone {
                batch,
                cancelled: done.cancelled,
            });
        }
    }
}
