#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are CSS pixels relative to the viewport, origin at top-left.
//! Transforms are applied about the element center, matching the default
//! `transform-origin: 50% 50%` of the page stylesheet.

/// Default tolerance for geometry comparisons (sub-pixel).
pub const SUBPIXEL_TOLERANCE: f64 = 0.01;

/// A rendered bounding box, as captured from layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// A geometry reading taken from an element's current rendered layout.
pub type GeometrySnapshot = Rect;

impl Rect {
    /// Zero-sized rectangle at the origin. Hidden elements report this.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point `(cx, cy)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Move the rectangle by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Compare two rectangles edge by edge within `tolerance`.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// A 2D transform: translate plus non-uniform scale about the box center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, unit scale.
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Pure translation.
    #[inline]
    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self {
            translate_x: dx,
            translate_y: dy,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Whether this transform leaves every box unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply to a layout box, scaling about its center and then translating.
    pub fn apply(&self, rect: Rect) -> Rect {
        let (cx, cy) = rect.center();
        let width = rect.width * self.scale_x;
        let height = rect.height * self.scale_y;
        Rect::new(
            cx + self.translate_x - width / 2.0,
            cy + self.translate_y - height / 2.0,
            width,
            height,
        )
    }

    /// The transform that makes a box laid out at `target` render exactly
    /// over `source`.
    ///
    /// A degenerate target dimension yields unit scale on that axis.
    pub fn morph_from(source: Rect, target: Rect) -> Self {
        let (sx, sy) = source.center();
        let (tx, ty) = target.center();
        Self {
            translate_x: sx - tx,
            translate_y: sy - ty,
            scale_x: ratio(source.width, target.width),
            scale_y: ratio(source.height, target.height),
        }
    }

    /// FLIP inversion: the translation that keeps a box whose layout moved
    /// from `first` to `last` visually at `first`.
    pub fn invert(first: Rect, last: Rect) -> Self {
        let (fx, fy) = first.center();
        let (lx, ly) = last.center();
        Self::translate(fx - lx, fy - ly)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::EPSILON {
        1.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_rect() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.center(), (60.0, 45.0));
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn identity_apply_is_noop() {
        let r = Rect::new(3.5, 7.25, 40.0, 30.0);
        assert_eq!(Transform::IDENTITY.apply(r), r);
    }

    #[test]
    fn scale_is_about_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let t = Transform {
            scale_x: 0.5,
            scale_y: 0.5,
            ..Transform::IDENTITY
        };
        assert_eq!(t.apply(r), Rect::new(25.0, 25.0, 50.0, 50.0));
    }

    #[test]
    fn morph_from_lands_on_source() {
        let source = Rect::new(40.0, 600.0, 320.0, 240.0);
        let target = Rect::new(200.0, 100.0, 880.0, 560.0);
        let t = Transform::morph_from(source, target);
        assert!(t.apply(target).approx_eq(&source, SUBPIXEL_TOLERANCE));
    }

    #[test]
    fn morph_from_degenerate_target_keeps_unit_scale() {
        let t = Transform::morph_from(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::ZERO);
        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn invert_restores_first_position() {
        let first = Rect::new(360.0, 0.0, 320.0, 400.0);
        let last = Rect::new(0.0, 0.0, 320.0, 400.0);
        let t = Transform::invert(first, last);
        assert!(t.apply(last).approx_eq(&first, SUBPIXEL_TOLERANCE));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.99, 9.99));
        assert!(!r.contains(10.0, 5.0));
    }
}
