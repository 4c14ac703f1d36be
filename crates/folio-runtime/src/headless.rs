#![forbid(unsafe_code)]

//! Deterministic in-memory [`Surface`].
//!
//! Design goals:
//! - **Host-free**: no browser, no wasm; layout is computed on demand.
//! - **Deterministic**: identical write sequences give identical geometry.
//! - **Observable**: counts mutations and layout reads so tests can assert
//!   that an operation touched nothing.
//!
//! # Layout model
//!
//! Each element has a [`Placement`]:
//! - `Flow` elements are positioned by their parent's [`GridSpec`]; among the
//!   parent's rendered children, the n-th occupies grid cell n (row-major).
//!   A flow element whose parent has no grid has a zero box.
//! - `Fixed(rect)` is a document-space box that scrolls with the page.
//! - `Viewport(rect)` is pinned to the viewport (`position: fixed`); it and
//!   its descendants ignore scrolling.
//!
//! The rendered box is the layout box with the element's own transform
//! applied about its center. Ancestor transforms are not composed.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use folio_core::geometry::Rect;
use folio_core::style::{Display, StyleProp, StyleValues};

use crate::surface::{ElementId, Surface};

/// Row-major grid used to place flow children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub origin_x: f64,
    pub origin_y: f64,
    pub columns: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
}

impl GridSpec {
    /// Box of the `index`-th cell.
    pub fn cell(&self, index: usize) -> Rect {
        let columns = self.columns.max(1);
        let col = (index % columns) as f64;
        let row = (index / columns) as f64;
        Rect::new(
            self.origin_x + col * (self.cell_width + self.gap),
            self.origin_y + row * (self.cell_height + self.gap),
            self.cell_width,
            self.cell_height,
        )
    }
}

/// How an element gets its layout box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Flow,
    Fixed(Rect),
    Viewport(Rect),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    display: Display,
    style: StyleValues,
    placement: Placement,
    grid: Option<GridSpec>,
}

impl Node {
    fn new(parent: Option<ElementId>, class: &str, placement: Placement) -> Self {
        let classes = class.split_whitespace().map(str::to_owned).collect();
        Self {
            parent,
            children: Vec::new(),
            classes,
            attrs: BTreeMap::new(),
            text: String::new(),
            display: Display::Block,
            style: StyleValues::default(),
            placement,
            grid: None,
        }
    }
}

/// In-memory surface with a grid layout model.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    nodes: Vec<Node>,
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    scroll_locked: bool,
    mutations: u64,
    layout_reads: Cell<u64>,
}

impl HeadlessSurface {
    /// Create a surface with a root element covering the viewport.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let root = Node::new(
            None,
            "page",
            Placement::Fixed(Rect::new(0.0, 0.0, viewport_width, viewport_height)),
        );
        Self {
            nodes: vec![root],
            viewport_width,
            viewport_height,
            scroll_y: 0.0,
            scroll_locked: false,
            mutations: 0,
            layout_reads: Cell::new(0),
        }
    }

    /// The root element (`<body>`).
    #[inline]
    pub const fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    /// Insert an element with an explicit placement.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live element; building a fixture against
    /// a dangling parent is a test bug.
    pub fn insert(&mut self, parent: ElementId, class: &str, placement: Placement) -> ElementId {
        assert!(self.contains(parent), "unknown parent {parent}");
        let id = ElementId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node::new(Some(parent), class, placement));
        self.nodes[parent.get() as usize].children.push(id);
        id
    }

    /// Make `el` lay out its flow children on a grid.
    pub fn set_grid(&mut self, el: ElementId, grid: GridSpec) {
        if let Some(node) = self.node_mut(el) {
            node.grid = Some(grid);
        }
    }

    /// Scroll the document. Ignored while scrolling is locked.
    pub fn set_scroll_y(&mut self, y: f64) {
        if !self.scroll_locked {
            self.scroll_y = y.max(0.0);
        }
    }

    #[inline]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Number of write calls that reached a live element.
    #[inline]
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Number of `bounding_rect` calls so far.
    #[inline]
    pub fn layout_reads(&self) -> u64 {
        self.layout_reads.get()
    }

    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.text.as_str())
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.node(el).map_or(&[], |n| n.children.as_slice())
    }

    /// Every element carrying `class`, in creation order.
    pub fn find_by_class(&self, class: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classes.contains(class))
            .map(|(i, _)| ElementId::new(i as u32))
            .collect()
    }

    /// Whether the element and all its ancestors are displayed.
    pub fn is_rendered(&self, el: ElementId) -> bool {
        let mut cursor = Some(el);
        while let Some(id) = cursor {
            match self.node(id) {
                Some(node) if !node.display.is_none() => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Untransformed layout box in viewport coordinates.
    pub fn layout_rect(&self, el: ElementId) -> Option<Rect> {
        let node = self.node(el)?;
        if !self.is_rendered(el) {
            return Some(Rect::ZERO);
        }
        let doc = match node.placement {
            Placement::Viewport(rect) => return Some(rect),
            Placement::Fixed(rect) => rect,
            Placement::Flow => self.flow_rect(el, node),
        };
        if self.is_viewport_pinned(el) {
            Some(doc)
        } else {
            Some(doc.offset(0.0, -self.scroll_y))
        }
    }

    fn flow_rect(&self, el: ElementId, node: &Node) -> Rect {
        let Some(parent) = node.parent.and_then(|p| self.node(p)) else {
            return Rect::ZERO;
        };
        let Some(grid) = parent.grid else {
            return Rect::ZERO;
        };
        let index = parent
            .children
            .iter()
            .filter(|&&c| self.node(c).is_some_and(|n| !n.display.is_none()))
            .position(|&c| c == el);
        index.map_or(Rect::ZERO, |i| grid.cell(i))
    }

    fn is_viewport_pinned(&self, el: ElementId) -> bool {
        let mut cursor = Some(el);
        while let Some(id) = cursor {
            match self.node(id) {
                Some(node) if matches!(node.placement, Placement::Viewport(_)) => return true,
                Some(node) => cursor = node.parent,
                None => return false,
            }
        }
        false
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.get() as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        let node = self.nodes.get_mut(el.get() as usize)?;
        self.mutations += 1;
        Some(node)
    }
}

impl Surface for HeadlessSurface {
    fn document_root(&self) -> ElementId {
        self.root()
    }

    fn contains(&self, el: ElementId) -> bool {
        self.node(el).is_some()
    }

    fn append_child(&mut self, parent: ElementId, class: &str) -> Option<ElementId> {
        if !self.contains(parent) {
            return None;
        }
        self.mutations += 1;
        Some(self.insert(parent, class, Placement::Flow))
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        self.layout_reads.set(self.layout_reads.get() + 1);
        let node = self.node(el)?;
        if !self.is_rendered(el) {
            return Some(Rect::ZERO);
        }
        let layout = self.layout_rect(el)?;
        Some(node.style.transform.apply(layout))
    }

    fn display(&self, el: ElementId) -> Display {
        self.node(el).map_or(Display::None, |n| n.display)
    }

    fn set_display(&mut self, el: ElementId, display: Display) {
        if let Some(node) = self.node_mut(el) {
            node.display = display;
        }
    }

    fn style(&self, el: ElementId, prop: StyleProp) -> f64 {
        self.node(el).map_or(prop.initial(), |n| n.style.get(prop))
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProp, value: f64) {
        if let Some(node) = self.node_mut(el) {
            node.style.set(prop, value);
        }
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes.contains(class))
    }

    fn set_class(&mut self, el: ElementId, class: &str, enabled: bool) {
        if let Some(node) = self.node_mut(el) {
            if enabled {
                node.classes.insert(class.to_owned());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            text.clone_into(&mut node.text);
        }
    }

    fn set_attr(&mut self, el: ElementId, name: &str, value: Option<&str>) {
        if let Some(node) = self.node_mut(el) {
            match value {
                Some(v) => {
                    node.attrs.insert(name.to_owned(), v.to_owned());
                }
                None => {
                    node.attrs.remove(name);
                }
            }
        }
    }

    fn attr(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el).and_then(|n| n.attrs.get(name).cloned())
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.mutations += 1;
        self.scroll_locked = locked;
    }
}
