#![forbid(unsafe_code)]

//! Mobile navigation menu.

use folio_runtime::{ElementId, Surface};

pub const OPEN_CLASS: &str = "active";

/// The hamburger toggle and the link list it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileMenu {
    toggle: ElementId,
    list: ElementId,
    links: Vec<ElementId>,
}

impl MobileMenu {
    pub fn new(toggle: ElementId, list: ElementId, links: Vec<ElementId>) -> Self {
        Self { toggle, list, links }
    }

    pub fn is_open<S: Surface + ?Sized>(&self, surface: &S) -> bool {
        surface.has_class(self.list, OPEN_CLASS)
    }

    /// Flip the menu; returns whether it is now open.
    pub fn toggle<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        surface.toggle_class(self.toggle, OPEN_CLASS);
        surface.toggle_class(self.list, OPEN_CLASS)
    }

    pub fn close<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_class(self.toggle, OPEN_CLASS, false);
        surface.set_class(self.list, OPEN_CLASS, false);
    }

    /// Whether `target` is the toggle button.
    pub fn is_toggle(&self, target: ElementId) -> bool {
        target == self.toggle
    }

    /// Whether `target` is one of the menu's links.
    pub fn is_link(&self, target: ElementId) -> bool {
        self.links.contains(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Rect;
    use folio_runtime::{HeadlessSurface, Placement};

    #[test]
    fn toggle_and_link_click() {
        let mut surface = HeadlessSurface::new(400.0, 800.0);
        let root = surface.root();
        let toggle = surface.insert(root, "menu-toggle", Placement::Fixed(Rect::ZERO));
        let list = surface.insert(root, "nav-links", Placement::Fixed(Rect::ZERO));
        let link = surface.insert(list, "nav-link", Placement::Fixed(Rect::ZERO));
        let menu = MobileMenu::new(toggle, list, vec![link]);

        assert!(menu.toggle(&mut surface));
        assert!(menu.is_open(&surface));
        assert!(surface.has_class(toggle, OPEN_CLASS));
        assert!(menu.is_link(link));

        menu.close(&mut surface);
        assert!(!menu.is_open(&surface));
        assert!(!surface.has_class(toggle, OPEN_CLASS));

        menu.toggle(&mut surface);
        assert!(!menu.toggle(&mut surface));
    }
}
