//! Basic geometry, color and image types.
//!
//! Geometry is unclamped on purpose: insetting a rectangle by more than its
//! size yields a negative width or height, and callers that need
//! non-negative geometry clamp it themselves.

use std::sync::Arc;

use serde::Deserialize;

/// A point in 2D space.
///
/// Also used as a symmetric inset (`x` applied on both horizontal edges,
/// `y` on both vertical edges).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Shrink by `dx` on the left and right edges and `dy` on the top and bottom.
    ///
    /// The result is not clamped.
    #[inline]
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.origin.x + dx,
            self.origin.y + dy,
            self.size.width - dx * 2.0,
            self.size.height - dy * 2.0,
        )
    }

    /// Offset the rectangle by the given amount.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            origin: Point {
                x: self.origin.x + dx,
                y: self.origin.y + dy,
            },
            size: self.size,
        }
    }
}

/// An RGBA color with premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from premultiplied RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from straight (non-premultiplied) 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let alpha = f32::from(a) / 255.0;
        let channel = |c: u8| f32::from(c) / 255.0 * alpha;
        Self::new(channel(r), channel(g), channel(b), alpha)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| -> Option<u8> { u8::from_str_radix(digits.get(i..i + 2)?, 16).ok() };
        let alpha = if digits.len() == 8 { byte(6)? } else { u8::MAX };
        Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, alpha))
    }

    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
}

/// A reference to an image asset.
///
/// Asset loading and decoding belong to the host; the field only needs a
/// stable name to hand back and the intrinsic size to measure the accessory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ImageSpec")]
pub struct Image {
    name: Arc<str>,
    size: Size,
}

impl Image {
    /// Create an image reference with an intrinsic size.
    pub fn new(name: impl AsRef<str>, size: Size) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            size,
        }
    }

    /// Create an image reference with no intrinsic size.
    pub fn named(name: impl AsRef<str>) -> Self {
        Self::new(name, Size::ZERO)
    }

    /// The asset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The intrinsic size.
    pub fn size(&self) -> Size {
        self.size
    }
}

#[derive(Deserialize)]
struct ImageSpec {
    name: String,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
}

impl From<ImageSpec> for Image {
    fn from(spec: ImageSpec) -> Self {
        Image::new(spec.name, Size::new(spec.width, spec.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);

        let p2: Point = (3.0, 4.0).into();
        assert_eq!(p2, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_rect_geometry() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.offset(-5.0, 0.0).right(), 105.0);
    }

    #[test]
    fn test_rect_inset_is_unclamped() {
        let r = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(r.inset(10.0, 5.0), Rect::new(10.0, 5.0, 80.0, 30.0));

        let over = r.inset(60.0, 0.0);
        assert_eq!(over.width(), -20.0);
        assert!(over.is_empty());
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("0000ff"), Some(Color::BLUE));

        let c2 = Color::from_hex("#00FF0080").unwrap();
        // Premultiplied alpha: g = 1.0 * 0.5 = 0.5
        assert!((c2.g - 0.5).abs() < 0.01);
        assert!((c2.a - 0.5).abs() < 0.01);

        assert!(Color::from_hex("#F00").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn test_image_reference() {
        let image = Image::new("eye.closed", Size::new(20.0, 16.0));
        assert_eq!(image.name(), "eye.closed");
        assert_eq!(image.size(), Size::new(20.0, 16.0));
        assert_eq!(image, image.clone());
        assert_eq!(Image::named("lock").size(), Size::ZERO);
    }
}
