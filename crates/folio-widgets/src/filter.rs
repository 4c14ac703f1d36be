#![forbid(unsafe_code)]

//! FLIP reconciliation of the project gallery.
//!
//! Changing the active filter partitions the cards into three ordered,
//! disjoint sequences and animates each:
//!
//! - **leaving** (visible, no longer matching): fade, shrink and drop, then
//!   `display: none` once the whole group has finished.
//! - **entering** (hidden, now matching): revealed in their hidden pose and
//!   eased in with a stagger.
//! - **staying** (visible, still matching): First/Last snapshots around the
//!   layout change, inverted by their center delta, then played back to
//!   rest on a critically damped spring.
//!
//! # State machine
//!
//! ```text
//! Idle ──apply──► Leaving ──leave batch done──► Playing ──all batches done──► Idle
//!   └──────────apply (nothing leaving)──────────►┘
//! ```
//!
//! Each stage waits on [`TweenEvent`]s from the engine; there are no nested
//! completion callbacks. Layout is read only when First and Last are taken.
//!
//! # Invariants
//!
//! 1. After `apply_filter(f)`, every card's `visible == f.matches(card)`.
//! 2. Re-applying the active filter touches neither the surface nor the
//!    engine.
//! 3. Right after a staying card's inversion is applied, its rendered box
//!    equals its First box.
//! 4. A card's in-transition marker is cleared exactly when its own tween
//!    is done.
//!
//! # Failure Modes
//!
//! - A new filter while a pass is in flight cancels the old pass per card,
//!   re-syncs visibility with what is displayed, and plans from there.
//!   Events from the cancelled pass are ignored.

use std::fmt;

use ahash::AHashSet;
use folio_core::animation::{Easing, SpringCurve};
use folio_core::geometry::{GeometrySnapshot, Rect, Transform};
use folio_core::style::{Display, StyleProp};
use folio_runtime::{FilterMotion, Surface, TweenEngine, TweenEvent, TweenId, TweenSpec};
use tracing::{debug, info};

use crate::registry::{CardId, CardRecord, CardRegistry, TRANSITIONING_CLASS};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// The active project filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub enum Filter {
    #[default]
    All,
    /// Lower-cased substring matched against a card's category text.
    Tag(String),
}

impl Filter {
    /// Parse a filter button value. `"all"` in any case is [`Filter::All`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Tag(value.to_lowercase())
        }
    }

    pub fn matches(&self, card: &CardRecord) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => card.category_text.contains(tag.as_str()),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

/// Filter state owned by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub active: Filter,
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// A staying card and its snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayingCard {
    pub card: CardId,
    pub first: GeometrySnapshot,
    /// Taken after leaving cards have collapsed.
    pub last: Option<GeometrySnapshot>,
}

impl StayingCard {
    /// Translation from Last back to First.
    pub fn delta(&self) -> Option<Transform> {
        self.last.map(|last| Transform::invert(self.first, last))
    }
}

/// Partition of a filter change, each sequence in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionPlan {
    pub leaving: Vec<CardId>,
    pub entering: Vec<CardId>,
    pub staying: Vec<StayingCard>,
}

impl TransitionPlan {
    /// Partition cards by current visibility and whether `filter` shows them.
    /// First snapshots start out zeroed.
    pub fn partition(registry: &CardRegistry, filter: &Filter) -> Self {
        let mut plan = Self::default();
        for (id, card) in registry.iter() {
            match (card.visible, filter.matches(card)) {
                (true, false) => plan.leaving.push(id),
                (false, true) => plan.entering.push(id),
                (true, true) => plan.staying.push(StayingCard {
                    card: id,
                    first: Rect::ZERO,
                    last: None,
                }),
                (false, false) => {}
            }
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.leaving.is_empty() && self.entering.is_empty() && self.staying.is_empty()
    }

    pub fn len(&self) -> usize {
        self.leaving.len() + self.entering.len() + self.staying.len()
    }

    /// Every card in the plan.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.leaving
            .iter()
            .chain(&self.entering)
            .copied()
            .chain(self.staying.iter().map(|s| s.card))
    }

    pub fn staying_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.staying.iter().map(|s| s.card)
    }
}

/// Result of [`FilterReconciler::apply_filter`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The filter was already active; nothing happened.
    Unchanged,
    /// A pass was planned and started.
    Applied(TransitionPlan),
}

impl FilterOutcome {
    pub fn plan(&self) -> Option<&TransitionPlan> {
        match self {
            Self::Unchanged => None,
            Self::Applied(plan) => Some(plan),
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    /// Waiting on the leave batch before measuring Last.
    Leaving { batch: TweenId, plan: TransitionPlan },
    /// Staying and entering tweens running.
    Playing { batches: AHashSet<TweenId> },
}

/// Drives filter passes over the card registry.
#[derive(Debug, Clone)]
pub struct FilterReconciler {
    state: FilterState,
    stage: Stage,
    motion: FilterMotion,
}

impl Default for FilterReconciler {
    fn default() -> Self {
        Self::new(FilterMotion::default())
    }
}

impl FilterReconciler {
    pub fn new(motion: FilterMotion) -> Self {
        Self {
            state: FilterState::default(),
            stage: Stage::Idle,
            motion,
        }
    }

    #[inline]
    pub fn active(&self) -> &Filter {
        &self.state.active
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Whether a pass is still animating.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        !matches!(self.stage, Stage::Idle)
    }

    /// Switch to `filter` and start the transition.
    pub fn apply_filter<S: Surface + ?Sized>(
        &mut self,
        filter: Filter,
        registry: &mut CardRegistry,
        surface: &mut S,
        engine: &mut TweenEngine,
    ) -> FilterOutcome {
        if filter == self.state.active {
            debug!(%filter, "filter already active");
            return FilterOutcome::Unchanged;
        }
        if self.is_transitioning() {
            self.interrupt(registry, surface, engine);
        }

        let mut plan = TransitionPlan::partition(registry, &filter);
        info!(
            from = %self.state.active,
            to = %filter,
            leaving = plan.leaving.len(),
            entering = plan.entering.len(),
            staying = plan.staying.len(),
            "filter pass planned"
        );
        self.state.active = filter;

        // First.
        for staying in &mut plan.staying {
            if let Some(card) = registry.get(staying.card) {
                staying.first = surface.bounding_rect(card.element).unwrap_or(Rect::ZERO);
            }
        }

        for id in plan.leaving.iter().chain(&plan.entering) {
            if let Some(card) = registry.get_mut(*id) {
                card.visible = !card.visible;
            }
        }
        for id in plan.cards() {
            set_transitioning(registry, surface, id, true);
        }

        if plan.is_empty() {
            self.stage = Stage::Idle;
            return FilterOutcome::Applied(plan);
        }

        if plan.leaving.is_empty() {
            self.play(&mut plan, registry, surface, engine);
        } else {
            let targets = plan
                .leaving
                .iter()
                .filter_map(|id| registry.get(*id).map(|c| c.element));
            let batch = engine.start(
                TweenSpec::new(targets, self.motion.leave())
                    .to(StyleProp::Opacity, 0.0)
                    .scale_to(self.motion.hidden_scale)
                    .to(StyleProp::TranslateY, self.motion.hidden_offset_y)
                    .easing(Easing::EaseInQuad)
                    .label("filter-leave"),
                surface,
            );
            self.stage = Stage::Leaving {
                batch,
                plan: plan.clone(),
            };
        }
        FilterOutcome::Applied(plan)
    }

    /// Route an engine event. Events from other batches are ignored.
    pub fn on_tween_event<S: Surface + ?Sized>(
        &mut self,
        event: &TweenEvent,
        registry: &mut CardRegistry,
        surface: &mut S,
        engine: &mut TweenEngine,
    ) {
        match (&mut self.stage, *event) {
            (Stage::Leaving { batch, plan }, TweenEvent::BatchDone { batch: done, .. }) if *batch == done => {
                let mut plan = std::mem::take(plan);
                for id in &plan.leaving {
                    if let Some(card) = registry.get(*id) {
                        surface.set_display(card.element, Display::None);
                        surface.clear_styles(card.element);
                    }
                    set_transitioning(registry, surface, *id, false);
                }
                self.play(&mut plan, registry, surface, engine);
            }
            (Stage::Playing { batches }, TweenEvent::ElementDone { batch, element, .. }) if batches.contains(&batch) => {
                if let Some(id) = registry.by_element(element) {
                    set_transitioning(registry, surface, id, false);
                }
            }
            (Stage::Playing { batches }, TweenEvent::BatchDone { batch, .. }) => {
                if batches.remove(&batch) && batches.is_empty() {
                    self.stage = Stage::Idle;
                    info!(filter = %self.state.active, "filter pass finished");
                }
            }
            _ => {}
        }
    }

    /// Reveal entering cards, measure Last, invert and play.
    fn play<S: Surface + ?Sized>(
        &mut self,
        plan: &mut TransitionPlan,
        registry: &mut CardRegistry,
        surface: &mut S,
        engine: &mut TweenEngine,
    ) {
        let hidden_scale = self.motion.hidden_scale;
        let hidden_offset = self.motion.hidden_offset_y;

        for id in &plan.entering {
            if let Some(card) = registry.get(*id) {
                surface.set_display(card.element, Display::Block);
                surface.set_style(card.element, StyleProp::Opacity, 0.0);
                surface.set_style(card.element, StyleProp::ScaleX, hidden_scale);
                surface.set_style(card.element, StyleProp::ScaleY, hidden_scale);
                surface.set_style(card.element, StyleProp::TranslateY, hidden_offset);
            }
        }

        // Last.
        for staying in &mut plan.staying {
            let Some(card) = registry.get(staying.card) else {
                continue;
            };
            surface.set_style(card.element, StyleProp::TranslateX, 0.0);
            surface.set_style(card.element, StyleProp::TranslateY, 0.0);
            staying.last = surface.bounding_rect(card.element);
        }

        let mut batches = AHashSet::new();
        for staying in &plan.staying {
            let (Some(card), Some(delta)) = (registry.get(staying.card), staying.delta()) else {
                continue;
            };
            let batch = engine.start(
                TweenSpec::new([card.element], self.motion.flip())
                    .track(StyleProp::TranslateX, delta.translate_x, 0.0)
                    .track(StyleProp::TranslateY, delta.translate_y, 0.0)
                    .to(StyleProp::Opacity, 1.0)
                    .scale_to(1.0)
                    .easing(Easing::Spring(SpringCurve::critical()))
                    .label("filter-flip"),
                surface,
            );
            batches.insert(batch);
        }

        if !plan.entering.is_empty() {
            let targets = plan
                .entering
                .iter()
                .filter_map(|id| registry.get(*id).map(|c| c.element));
            let batch = engine.start(
                TweenSpec::new(targets, self.motion.enter())
                    .track(StyleProp::Opacity, 0.0, 1.0)
                    .scale(hidden_scale, 1.0)
                    .track(StyleProp::TranslateY, hidden_offset, 0.0)
                    .easing(Easing::EaseOutExpo)
                    .stagger(self.motion.enter_stagger())
                    .label("filter-enter"),
                surface,
            );
            batches.insert(batch);
        }

        if batches.is_empty() {
            self.stage = Stage::Idle;
            info!(filter = %self.state.active, "filter pass finished");
        } else {
            self.stage = Stage::Playing { batches };
        }
    }

    /// Abandon the pass in flight.
    fn interrupt<S: Surface + ?Sized>(
        &mut self,
        registry: &mut CardRegistry,
        surface: &mut S,
        engine: &mut TweenEngine,
    ) {
        let mut cancelled = 0;
        let ids: Vec<CardId> = registry
            .iter()
            .filter(|(_, c)| c.in_transition)
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            let Some(card) = registry.get_mut(id) else {
                continue;
            };
            engine.cancel_element(card.element);
            card.visible = !surface.display(card.element).is_none();
            cancelled += 1;
            set_transitioning(registry, surface, id, false);
        }
        self.stage = Stage::Idle;
        debug!(cancelled, "filter pass interrupted");
    }
}

fn set_transitioning<S: Surface + ?Sized>(
    registry: &mut CardRegistry,
    surface: &mut S,
    id: CardId,
    on: bool,
) {
    if let Some(card) = registry.get_mut(id) {
        if card.in_transition != on {
            card.in_transition = on;
            surface.set_class(card.element, TRANSITIONING_CLASS, on);
        }
    }
}
