#![forbid(unsafe_code)]

//! Page entrance choreography, played once on mount.

use folio_core::animation::Easing;
use folio_core::style::StyleProp;
use folio_runtime::{ElementId, EntranceMotion, Surface, TweenEngine, TweenId, TweenSpec};

/// Element groups animated on entrance. Empty groups are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntranceTargets {
    pub hero_text: Vec<ElementId>,
    pub hero_image: Vec<ElementId>,
    pub skill_tags: Vec<ElementId>,
    pub project_cards: Vec<ElementId>,
    pub partner_cards: Vec<ElementId>,
    pub social_links: Vec<ElementId>,
}

/// Start every entrance tween. Under reduced motion the config's entrance is
/// already instant and the elements land at rest on the next tick.
pub fn play_entrance<S: Surface + ?Sized>(
    targets: &EntranceTargets,
    motion: &EntranceMotion,
    surface: &mut S,
    engine: &mut TweenEngine,
) -> Vec<TweenId> {
    let steps = [
        ("entrance-hero-text", &targets.hero_text, motion.hero_text, StyleProp::TranslateY),
        ("entrance-skill-tags", &targets.skill_tags, motion.skill_tags, StyleProp::TranslateY),
        ("entrance-project-cards", &targets.project_cards, motion.project_cards, StyleProp::TranslateY),
        ("entrance-partner-cards", &targets.partner_cards, motion.partner_cards, StyleProp::TranslateY),
        ("entrance-social-links", &targets.social_links, motion.social_links, StyleProp::TranslateX),
    ];

    let mut batches = Vec::new();
    for (label, group, step, axis) in steps {
        if group.is_empty() {
            continue;
        }
        batches.push(engine.start(
            TweenSpec::new(group.iter().copied(), step.duration())
                .track(StyleProp::Opacity, 0.0, 1.0)
                .track(axis, step.offset, 0.0)
                .stagger(step.stagger())
                .easing(Easing::EaseOutExpo)
                .label(label),
            surface,
        ));
    }
    if !targets.hero_image.is_empty() {
        batches.push(engine.start(
            TweenSpec::new(targets.hero_image.iter().copied(), motion.hero_image())
                .track(StyleProp::Opacity, 0.0, 1.0)
                .scale(motion.hero_image_scale, 1.0)
                .delay(motion.hero_image_delay())
                .easing(Easing::EaseOutExpo)
                .label("entrance-hero-image"),
            surface,
        ));
    }
    batches
}
