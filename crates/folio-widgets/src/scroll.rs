#![forbid(unsafe_code)]

//! Scroll-driven page state: the condensed header, the active navigation
//! link, and one-shot reveal animations.

use folio_core::animation::Easing;
use folio_core::style::StyleProp;
use folio_runtime::{EffectsMotion, ElementId, Surface, TweenEngine, TweenSpec};
use tracing::trace;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const REVEALED_CLASS: &str = "animated";

/// Elements the scroll controller watches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollElements {
    pub header: Option<ElementId>,
    /// Page sections, identified by their `id` attribute.
    pub sections: Vec<ElementId>,
    /// Navigation links, matched to sections by `href="#<id>"`.
    pub nav_links: Vec<ElementId>,
    /// Elements revealed once they scroll into view.
    pub reveal: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub struct ScrollController {
    elements: ScrollElements,
    motion: EffectsMotion,
}

impl ScrollController {
    pub fn new(elements: ScrollElements, motion: EffectsMotion) -> Self {
        Self { elements, motion }
    }

    /// Add elements to the reveal set, e.g. cards created after mount.
    pub fn watch(&mut self, elements: impl IntoIterator<Item = ElementId>) {
        self.elements.reveal.extend(elements);
    }

    /// Handle a scroll event.
    pub fn on_scroll<S: Surface + ?Sized>(&mut self, surface: &mut S, engine: &mut TweenEngine) {
        self.update_header(surface);
        self.update_active_link(surface);
        self.reveal(surface, engine);
    }

    pub fn update_header<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(header) = self.elements.header else {
            return;
        };
        let scrolled = surface.scroll_y() > self.motion.header_threshold;
        if surface.has_class(header, SCROLLED_CLASS) != scrolled {
            surface.set_class(header, SCROLLED_CLASS, scrolled);
        }
    }

    /// Id of the last section whose top, less the look-ahead, has been
    /// scrolled past.
    pub fn current_section<S: Surface + ?Sized>(&self, surface: &S) -> Option<String> {
        let scroll_y = surface.scroll_y();
        let mut current = None;
        for &section in &self.elements.sections {
            let Some(rect) = surface.bounding_rect(section) else {
                continue;
            };
            let top = rect.top() + scroll_y;
            if scroll_y >= top - self.motion.section_lead {
                current = surface.attr(section, "id");
            }
        }
        current
    }

    pub fn update_active_link<S: Surface + ?Sized>(&self, surface: &mut S) {
        let target = self.current_section(surface).map(|id| format!("#{id}"));
        for &link in &self.elements.nav_links {
            let active = target.is_some() && surface.attr(link, "href") == target;
            if surface.has_class(link, ACTIVE_CLASS) != active {
                surface.set_class(link, ACTIVE_CLASS, active);
            }
        }
    }

    /// Reveal every watched element that has entered the viewport. Returns
    /// how many were revealed.
    ///
    /// An element that is hidden or already animating is only marked; its
    /// running tween keeps every property it drives.
    pub fn reveal<S: Surface + ?Sized>(&mut self, surface: &mut S, engine: &mut TweenEngine) -> usize {
        let line = surface.viewport().height - self.motion.reveal_margin;
        let due: Vec<ElementId> = self
            .elements
            .reveal
            .iter()
            .copied()
            .filter(|&el| !surface.has_class(el, REVEALED_CLASS))
            .filter(|&el| surface.bounding_rect(el).is_some_and(|r| r.top() < line))
            .collect();
        let mut animated = 0;
        for &el in &due {
            surface.set_class(el, REVEALED_CLASS, true);
            if surface.display(el).is_none() || engine.is_animating(el) {
                continue;
            }
            engine.start(
                TweenSpec::new([el], self.motion.reveal())
                    .track(StyleProp::Opacity, 0.0, 1.0)
                    .track(StyleProp::TranslateY, self.motion.reveal_offset_y, 0.0)
                    .easing(Easing::EaseOutExpo)
                    .label("reveal"),
                surface,
            );
            animated += 1;
        }
        if !due.is_empty() {
            trace!(count = due.len(), animated, "elements revealed");
        }
        due.len()
    }
}
