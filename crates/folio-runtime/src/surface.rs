#![forbid(unsafe_code)]

//! The rendering surface abstraction.
//!
//! A [`Surface`] is the page as the motion engine sees it: a tree of
//! elements addressed by [`ElementId`], each with a display mode, a class
//! list, text, attributes, and the numeric style properties the tween engine
//! drives.
//!
//! # Contract
//!
//! - Writes to unknown elements are ignored; reads return neutral values
//!   (`None`, `Display::None`, the property's initial value, `false`).
//! - [`Surface::bounding_rect`] is a layout read. Implementations must
//!   reflect every prior write, so callers treat it as a layout flush point.
//! - An element that is not rendered (itself or an ancestor has
//!   `display: none`) reports [`Rect::ZERO`].

use folio_core::geometry::{Rect, Transform};
use folio_core::style::{Display, StyleProp};

/// Opaque handle to a surface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host page surface.
pub trait Surface {
    /// The document element, where page-wide classes such as the theme go.
    fn document_root(&self) -> ElementId;

    /// Whether the handle refers to a live element.
    fn contains(&self, el: ElementId) -> bool;

    /// Create a new element as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, class: &str) -> Option<ElementId>;

    /// Rendered bounding box, transform included. `None` for unknown handles.
    fn bounding_rect(&self, el: ElementId) -> Option<Rect>;

    fn display(&self, el: ElementId) -> Display;

    fn set_display(&mut self, el: ElementId, display: Display);

    fn style(&self, el: ElementId, prop: StyleProp) -> f64;

    fn set_style(&mut self, el: ElementId, prop: StyleProp, value: f64);

    fn has_class(&self, el: ElementId, class: &str) -> bool;

    fn set_class(&mut self, el: ElementId, class: &str, enabled: bool);

    /// Replace the element's content. Markup is passed through verbatim.
    fn set_text(&mut self, el: ElementId, text: &str);

    /// Set (`Some`) or remove (`None`) an attribute.
    fn set_attr(&mut self, el: ElementId, name: &str, value: Option<&str>);

    fn attr(&self, el: ElementId, name: &str) -> Option<String>;

    /// Visible viewport in viewport coordinates.
    fn viewport(&self) -> Rect;

    /// Vertical document scroll offset.
    fn scroll_y(&self) -> f64;

    /// Lock or restore page scrolling (`overflow: hidden` on the body).
    fn set_scroll_locked(&mut self, locked: bool);

    /// Flip a class and return whether it is now present.
    fn toggle_class(&mut self, el: ElementId, class: &str) -> bool {
        let enabled = !self.has_class(el, class);
        self.set_class(el, class, enabled);
        enabled
    }

    /// Write every property of a transform.
    fn set_transform(&mut self, el: ElementId, transform: Transform) {
        self.set_style(el, StyleProp::TranslateX, transform.translate_x);
        self.set_style(el, StyleProp::TranslateY, transform.translate_y);
        self.set_style(el, StyleProp::ScaleX, transform.scale_x);
        self.set_style(el, StyleProp::ScaleY, transform.scale_y);
    }

    /// Read the current transform.
    fn transform(&self, el: ElementId) -> Transform {
        Transform {
            translate_x: self.style(el, StyleProp::TranslateX),
            translate_y: self.style(el, StyleProp::TranslateY),
            scale_x: self.style(el, StyleProp::ScaleX),
            scale_y: self.style(el, StyleProp::ScaleY),
        }
    }

    /// Reset every animatable property to its initial value.
    fn clear_styles(&mut self, el: ElementId) {
        for prop in StyleProp::ALL {
            self.set_style(el, prop, prop.initial());
        }
    }
}
