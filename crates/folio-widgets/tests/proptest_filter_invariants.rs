//! Property-based invariant tests for the filter reconciler.
//!
//! 1. A plan's three sequences are disjoint and in registry order
//! 2. Leaving and staying are exactly the visible cards; entering are hidden
//!    cards that match
//! 3. After any sequence of filter changes and ticks, once settled, the
//!    visible set is exactly the cards matching the last applied filter and
//!    matches what the surface displays
//! 4. Settled cards rest at their grid cell with an identity transform

use std::time::Duration;

use folio_core::geometry::{Rect, SUBPIXEL_TOLERANCE};
use folio_core::style::StyleProp;
use folio_runtime::{GridSpec, HeadlessSurface, Placement, Surface, TweenEngine};
use folio_widgets::filter::{Filter, FilterReconciler, TransitionPlan};
use folio_widgets::registry::CardRegistry;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

const CATEGORIES: [&str; 5] = ["Web + Design", "Mobile", "Web", "Game + Mobile", "Design"];
const FILTERS: [&str; 6] = ["all", "web", "design", "mobile", "game", "nothing"];

const GRID: GridSpec = GridSpec {
    origin_x: 0.0,
    origin_y: 0.0,
    columns: 3,
    cell_width: 120.0,
    cell_height: 80.0,
    gap: 8.0,
};

#[derive(Debug, Clone)]
enum Op {
    Apply(usize),
    Tick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..FILTERS.len()).prop_map(Op::Apply),
        (0u64..400).prop_map(Op::Tick),
    ]
}

fn cards_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..CATEGORIES.len(), 1..9)
}

struct Gallery {
    surface: HeadlessSurface,
    registry: CardRegistry,
    engine: TweenEngine,
    reconciler: FilterReconciler,
}

impl Gallery {
    fn new(cards: &[usize]) -> Self {
        let mut surface = HeadlessSurface::new(1280.0, 800.0);
        let root = surface.root();
        let container = surface.insert(root, "projects", Placement::Fixed(Rect::ZERO));
        surface.set_grid(container, GRID);
        let mut registry = CardRegistry::new();
        for (i, &category) in cards.iter().enumerate() {
            let el = surface.append_child(container, "project-card").unwrap();
            registry.register(&format!("Card {i}"), CATEGORIES[category], false, el, i);
        }
        Self {
            surface,
            registry,
            engine: TweenEngine::new(),
            reconciler: FilterReconciler::default(),
        }
    }

    fn apply(&mut self, filter: &str) {
        self.reconciler.apply_filter(
            Filter::parse(filter),
            &mut self.registry,
            &mut self.surface,
            &mut self.engine,
        );
    }

    fn tick(&mut self, dt: Duration) {
        for event in self.engine.tick(dt, &mut self.surface) {
            self.reconciler
                .on_tween_event(&event, &mut self.registry, &mut self.surface, &mut self.engine);
        }
    }

    fn settle(&mut self) {
        for _ in 0..400 {
            if self.engine.is_idle() && !self.reconciler.is_transitioning() {
                return;
            }
            self.tick(Duration::from_millis(16));
        }
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn partition_is_disjoint_and_exact(
        cards in cards_strategy(),
        first in 0..FILTERS.len(),
        second in 0..FILTERS.len(),
    ) {
        let mut g = Gallery::new(&cards);
        g.apply(FILTERS[first]);
        g.settle();

        let filter = Filter::parse(FILTERS[second]);
        let plan = TransitionPlan::partition(&g.registry, &filter);
        let staying: Vec<_> = plan.staying_ids().collect();

        for seq in [&plan.leaving, &plan.entering, &staying] {
            prop_assert!(seq.windows(2).all(|w| w[0] < w[1]));
        }
        for id in &plan.leaving {
            prop_assert!(!plan.entering.contains(id) && !staying.contains(id));
        }
        for id in &plan.entering {
            prop_assert!(!staying.contains(id));
        }

        for (id, card) in g.registry.iter() {
            let matches = filter.matches(card);
            prop_assert_eq!(plan.leaving.contains(&id), card.visible && !matches);
            prop_assert_eq!(staying.contains(&id), card.visible && matches);
            prop_assert_eq!(plan.entering.contains(&id), !card.visible && matches);
        }
    }

    #[test]
    fn settled_visibility_matches_last_filter(
        cards in cards_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let mut g = Gallery::new(&cards);
        let mut last = Filter::All;
        for op in &ops {
            match op {
                Op::Apply(i) => {
                    g.apply(FILTERS[*i]);
                    last = Filter::parse(FILTERS[*i]);
                }
                Op::Tick(ms) => g.tick(Duration::from_millis(*ms)),
            }
        }
        g.settle();

        prop_assert!(!g.reconciler.is_transitioning());
        prop_assert_eq!(g.reconciler.active(), &last);

        let mut slot = 0;
        for (_, card) in g.registry.iter() {
            let expected = last.matches(card);
            prop_assert_eq!(card.visible, expected);
            prop_assert_eq!(!g.surface.display(card.element).is_none(), expected);
            prop_assert!(!card.in_transition);
            if expected {
                let rect = g.surface.bounding_rect(card.element).unwrap();
                prop_assert!(
                    rect.approx_eq(&GRID.cell(slot), SUBPIXEL_TOLERANCE),
                    "card {} at {:?}, expected {:?}",
                    card.key,
                    rect,
                    GRID.cell(slot)
                );
                prop_assert_eq!(g.surface.style(card.element, StyleProp::Opacity), 1.0);
                slot += 1;
            }
        }
    }

    #[test]
    fn flip_start_pins_staying_cards_to_their_first_position(
        cards in cards_strategy(),
        first in 0..FILTERS.len(),
        second in 0..FILTERS.len(),
    ) {
        let mut g = Gallery::new(&cards);
        g.apply(FILTERS[first]);
        g.settle();

        let before: Vec<(usize, Rect)> = g
            .registry
            .iter()
            .filter(|(_, c)| c.visible)
            .map(|(id, c)| (id.index(), g.surface.bounding_rect(c.element).unwrap()))
            .collect();

        g.apply(FILTERS[second]);
        // Run the leave phase to its barrier, then one zero-length frame so
        // the flip batches have started but not moved.
        for _ in 0..100 {
            let leaving_done = g
                .registry
                .iter()
                .all(|(_, c)| c.visible || !c.in_transition);
            if leaving_done {
                break;
            }
            g.tick(Duration::from_millis(16));
        }
        g.tick(Duration::ZERO);

        let filter = Filter::parse(FILTERS[second]);
        for (index, first_rect) in before {
            let card = g.registry.iter().nth(index).map(|(_, c)| c.clone()).unwrap();
            if !filter.matches(&card) || !card.in_transition {
                continue;
            }
            let now = g.surface.bounding_rect(card.element).unwrap();
            let (fx, fy) = first_rect.center();
            let (nx, ny) = now.center();
            prop_assert!((fx - nx).abs() < SUBPIXEL_TOLERANCE && (fy - ny).abs() < SUBPIXEL_TOLERANCE,
                "card {} drifted from {:?} to {:?}", card.key, first_rect, now);
        }
    }
}
