//! Pure geometry primitives for the tile animations.
//!
//! These types have no GTK dependencies and can be unit tested directly.
//! All animation math (fragment generation, physics stepping, fall paths)
//! is built on top of them.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D vector/point in f64 pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit-length copy of this vector, or `None` for a zero-length vector.
    ///
    /// Callers must handle the `None` case explicitly; the shatter effect
    /// substitutes a randomized fallback direction there.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len == 0.0 {
            None
        } else {
            Some(Vec2::new(self.x / len, self.y / len))
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned rectangle in f64 pixel coordinates.
///
/// Used for tile bounds in parent-container space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// An integer rectangle, used for bitmap crop regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle has no area. Empty crops are skipped during
    /// fragment generation.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Center of the rectangle in f64 coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Clamp a nominal crop rectangle into `[0, bounds_w) x [0, bounds_h)`.
///
/// The origin is clamped into `[0, dimension - 1]` and the extent truncated
/// so `x + width <= bounds_w` (same for height). The result can be empty
/// (zero or negative extent); callers are expected to skip those.
///
/// # Examples
///
/// ```
/// use vibesettings_core::geometry::{IntRect, clamp_crop};
///
/// let inside = clamp_crop(IntRect::new(10, 10, 20, 20), 100, 100);
/// assert_eq!(inside, IntRect::new(10, 10, 20, 20));
///
/// let overhang = clamp_crop(IntRect::new(90, 0, 20, 20), 100, 100);
/// assert_eq!(overhang, IntRect::new(90, 0, 10, 20));
/// ```
pub fn clamp_crop(nominal: IntRect, bounds_w: i32, bounds_h: i32) -> IntRect {
    if bounds_w <= 0 || bounds_h <= 0 {
        return IntRect::new(0, 0, 0, 0);
    }

    let x = nominal.x.clamp(0, bounds_w - 1);
    let y = nominal.y.clamp(0, bounds_h - 1);
    let width = nominal.width.min(bounds_w - x);
    let height = nominal.height.min(bounds_h - y);

    IntRect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_length() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vec2::ZERO.length(), 0.0);
    }

    #[test]
    fn test_vec2_normalized() {
        let unit = Vec2::new(0.0, -7.0).normalized().unwrap();
        assert_eq!(unit, Vec2::new(0.0, -1.0));

        let diag = Vec2::new(5.0, 5.0).normalized().unwrap();
        assert!((diag.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_normalized_zero_is_none() {
        assert!(Vec2::ZERO.normalized().is_none());
    }

    #[test]
    fn test_vec2_ops() {
        let v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        assert_eq!(v - Vec2::new(4.0, 6.0), Vec2::ZERO);
        assert_eq!(Vec2::new(1.0, -2.0) * 2.0, Vec2::new(2.0, -4.0));

        let mut acc = Vec2::new(1.0, 1.0);
        acc += Vec2::new(0.5, -0.5);
        assert_eq!(acc, Vec2::new(1.5, 0.5));
    }

    #[test]
    fn test_rect_center() {
        // The reference scenario: a tile at (100, 100) sized 120x260 has its
        // center at (160, 230).
        let tile = Rect::new(100.0, 100.0, 120.0, 260.0);
        assert_eq!(tile.center(), Vec2::new(160.0, 230.0));
    }

    #[test]
    fn test_int_rect_center() {
        let r = IntRect::new(10, 20, 30, 40);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_clamp_crop_inside_untouched() {
        let r = clamp_crop(IntRect::new(5, 5, 10, 10), 100, 50);
        assert_eq!(r, IntRect::new(5, 5, 10, 10));
    }

    #[test]
    fn test_clamp_crop_negative_origin() {
        let r = clamp_crop(IntRect::new(-8, -3, 24, 24), 100, 100);
        assert_eq!(r, IntRect::new(0, 0, 24, 24));
    }

    #[test]
    fn test_clamp_crop_overhanging_extent() {
        let r = clamp_crop(IntRect::new(95, 40, 24, 24), 100, 50);
        assert_eq!(r, IntRect::new(95, 40, 5, 10));
    }

    #[test]
    fn test_clamp_crop_origin_past_bounds() {
        // Origin beyond the far edge clamps to the last valid pixel and the
        // extent collapses to at most one column.
        let r = clamp_crop(IntRect::new(300, 0, 24, 24), 120, 260);
        assert_eq!(r.x, 119);
        assert_eq!(r.width, 1);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_clamp_crop_zero_bounds_is_empty() {
        assert!(clamp_crop(IntRect::new(0, 0, 10, 10), 0, 50).is_empty());
        assert!(clamp_crop(IntRect::new(0, 0, 10, 10), 50, 0).is_empty());
    }

    #[test]
    fn test_clamp_crop_degenerate_extent_is_empty() {
        assert!(clamp_crop(IntRect::new(10, 10, 0, 5), 100, 100).is_empty());
        assert!(clamp_crop(IntRect::new(10, 10, 5, -2), 100, 100).is_empty());
    }
}
