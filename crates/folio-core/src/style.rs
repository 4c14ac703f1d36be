#![forbid(unsafe_code)]

//! Animatable style properties and display modes.

use crate::geometry::Transform;

/// A numeric style property the tween engine can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProp {
    Opacity,
    TranslateX,
    TranslateY,
    ScaleX,
    ScaleY,
}

impl StyleProp {
    /// Every property, in a stable order.
    pub const ALL: [StyleProp; 5] = [
        StyleProp::Opacity,
        StyleProp::TranslateX,
        StyleProp::TranslateY,
        StyleProp::ScaleX,
        StyleProp::ScaleY,
    ];

    /// Value of the property on an unstyled element.
    #[inline]
    pub const fn initial(self) -> f64 {
        match self {
            Self::Opacity | Self::ScaleX | Self::ScaleY => 1.0,
            Self::TranslateX | Self::TranslateY => 0.0,
        }
    }

    /// Whether the property is part of the element transform.
    #[inline]
    pub const fn is_transform(self) -> bool {
        !matches!(self, Self::Opacity)
    }

    /// CSS-ish name, used in log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
        }
    }
}

/// Resolved style values for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleValues {
    pub opacity: f64,
    pub transform: Transform,
}

impl Default for StyleValues {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform::IDENTITY,
        }
    }
}

impl StyleValues {
    /// Read one property.
    pub fn get(&self, prop: StyleProp) -> f64 {
        match prop {
            StyleProp::Opacity => self.opacity,
            StyleProp::TranslateX => self.transform.translate_x,
            StyleProp::TranslateY => self.transform.translate_y,
            StyleProp::ScaleX => self.transform.scale_x,
            StyleProp::ScaleY => self.transform.scale_y,
        }
    }

    /// Write one property. Opacity is clamped to `[0.0, 1.0]`.
    pub fn set(&mut self, prop: StyleProp, value: f64) {
        match prop {
            StyleProp::Opacity => self.opacity = value.clamp(0.0, 1.0),
            StyleProp::TranslateX => self.transform.translate_x = value,
            StyleProp::TranslateY => self.transform.translate_y = value,
            StyleProp::ScaleX => self.transform.scale_x = value,
            StyleProp::ScaleY => self.transform.scale_y = value,
        }
    }
}

/// Layout participation of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Laid out and rendered.
    #[default]
    Block,
    /// Removed from layout (`display: none`).
    None,
}

impl Display {
    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_values_match_default_style() {
        let values = StyleValues::default();
        for prop in StyleProp::ALL {
            assert_eq!(values.get(prop), prop.initial(), "{}", prop.name());
        }
    }

    #[test]
    fn opacity_is_clamped() {
        let mut values = StyleValues::default();
        values.set(StyleProp::Opacity, 1.4);
        assert_eq!(values.opacity, 1.0);
        values.set(StyleProp::Opacity, -0.2);
        assert_eq!(values.opacity, 0.0);
    }

    #[test]
    fn transform_props_round_trip() {
        let mut values = StyleValues::default();
        values.set(StyleProp::TranslateY, 20.0);
        values.set(StyleProp::ScaleX, 0.8);
        assert_eq!(values.transform.translate_y, 20.0);
        assert_eq!(values.get(StyleProp::ScaleX), 0.8);
        assert!(StyleProp::ScaleX.is_transform());
        assert!(!StyleProp::Opacity.is_transform());
    }
}
