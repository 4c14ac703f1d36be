#![forbid(unsafe_code)]

//! Magnetic buttons.
//!
//! While the pointer is over a button, the button leans toward it by
//! `(pointer - center) * strength`; when the pointer leaves it springs back.
//! Motion goes through a [`Spring`] per axis so retargeting mid-flight stays
//! smooth.

use std::time::Duration;

use folio_core::animation::Spring;
use folio_core::style::StyleProp;
use folio_runtime::{ElementId, Surface};

#[derive(Debug, Clone)]
struct Button {
    element: ElementId,
    x: Spring,
    y: Spring,
    hovered: bool,
}

#[derive(Debug, Clone)]
pub struct Magnetic {
    buttons: Vec<Button>,
    strength: f64,
}

impl Magnetic {
    pub fn new(elements: impl IntoIterator<Item = ElementId>, strength: f64) -> Self {
        let buttons = elements
            .into_iter()
            .map(|element| Button {
                element,
                x: Spring::new(0.0, 0.0),
                y: Spring::new(0.0, 0.0),
                hovered: false,
            })
            .collect();
        Self { buttons, strength }
    }

    pub fn is_hovered(&self, element: ElementId) -> bool {
        self.buttons.iter().any(|b| b.element == element && b.hovered)
    }

    /// Retarget every button for a pointer at viewport `(x, y)`.
    pub fn pointer_moved<S: Surface + ?Sized>(&mut self, x: f64, y: f64, surface: &S) {
        for button in &mut self.buttons {
            let Some(rect) = surface.bounding_rect(button.element) else {
                continue;
            };
            // Hit-test against the resting box so the lean does not move
            // the button out from under the pointer.
            let rest = rect.offset(-button.x.position(), -button.y.position());
            if rest.contains(x, y) {
                let (cx, cy) = rest.center();
                button.x.set_target((x - cx) * self.strength);
                button.y.set_target((y - cy) * self.strength);
                button.hovered = true;
            } else if button.hovered {
                button.x.set_target(0.0);
                button.y.set_target(0.0);
                button.hovered = false;
            }
        }
    }

    /// Pointer left the page.
    pub fn pointer_left(&mut self) {
        for button in &mut self.buttons {
            button.x.set_target(0.0);
            button.y.set_target(0.0);
            button.hovered = false;
        }
    }

    /// Step the springs and write translations for buttons still moving.
    pub fn tick<S: Surface + ?Sized>(&mut self, dt: Duration, surface: &mut S) {
        for button in &mut self.buttons {
            if button.x.is_at_rest() && button.y.is_at_rest() {
                continue;
            }
            button.x.advance(dt);
            button.y.advance(dt);
            surface.set_style(button.element, StyleProp::TranslateX, button.x.position());
            surface.set_style(button.element, StyleProp::TranslateY, button.y.position());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Rect;
    use folio_runtime::{HeadlessSurface, Placement};

    fn button() -> (HeadlessSurface, ElementId) {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let root = surface.root();
        let el = surface.insert(root, "btn", Placement::Fixed(Rect::new(100.0, 100.0, 100.0, 40.0)));
        (surface, el)
    }

    fn run(magnetic: &mut Magnetic, surface: &mut HeadlessSurface, frames: usize) {
        for _ in 0..frames {
            magnetic.tick(Duration::from_millis(16), surface);
        }
    }

    #[test]
    fn leans_toward_pointer_then_returns() {
        let (mut surface, el) = button();
        let mut magnetic = Magnetic::new([el], 0.3);

        magnetic.pointer_moved(190.0, 110.0, &surface);
        assert!(magnetic.is_hovered(el));
        run(&mut magnetic, &mut surface, 120);
        assert!((surface.style(el, StyleProp::TranslateX) - 12.0).abs() < 0.01);
        assert!((surface.style(el, StyleProp::TranslateY) + 3.0).abs() < 0.01);

        magnetic.pointer_moved(500.0, 500.0, &surface);
        assert!(!magnetic.is_hovered(el));
        run(&mut magnetic, &mut surface, 120);
        assert!(surface.style(el, StyleProp::TranslateX).abs() < 0.01);
    }

    #[test]
    fn idle_buttons_are_not_written() {
        let (mut surface, el) = button();
        let mut magnetic = Magnetic::new([el], 0.3);
        let before = surface.mutations();
        magnetic.pointer_moved(10.0, 10.0, &surface);
        run(&mut magnetic, &mut surface, 10);
        assert_eq!(surface.mutations(), before);
    }
}
