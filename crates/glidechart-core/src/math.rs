//! Chart-space math.
//!
//! Re-exports the `glam` types used for geometry (all chart geometry is
//! `f32`, top-left origin, y pointing down) and adds the small rectangle and
//! circle types the layout code passes around.

pub use glam::{Vec2, vec2};

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left)
    pub x: f32,
    /// Y position (top)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from position and size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Create from two corners.
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::from_pos_size(min, max - min)
    }

    /// Top-left corner.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Get the center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Get the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inset the rect by a padding amount on every side.
    pub fn inset(&self, padding: f32) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - padding * 2.0).max(0.0),
            height: (self.height - padding * 2.0).max(0.0),
        }
    }

    /// Translate the rect.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Point containment with inclusive left/top and exclusive right/bottom
    /// edges, so adjacent rects never both claim a point.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// Snap position to pixel centers (for crisp 1px strokes).
    pub fn align_to_stroke_pixels(&self) -> Self {
        Self::new(
            self.x.round() + 0.5,
            self.y.round() + 0.5,
            self.width.round(),
            self.height.round(),
        )
    }
}

/// A circle, as produced by fitting into a rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Largest circle centered in `rect` keeping `margin` from the shorter
    /// side. Radius never goes negative.
    pub fn fit_in_rect(rect: Rect, margin: Vec2) -> Self {
        let radius = if rect.width > rect.height {
            rect.height * 0.5 - margin.y
        } else {
            rect.width * 0.5 - margin.x
        };
        Self::new(rect.center(), radius.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(29.9, 29.9)));
        assert!(!rect.contains(Vec2::new(30.0, 15.0)));
        assert!(!rect.contains(Vec2::new(15.0, 30.0)));
    }

    #[test]
    fn test_fit_circle_uses_shorter_side() {
        let wide = Circle::fit_in_rect(Rect::new(0.0, 0.0, 200.0, 100.0), Vec2::new(5.0, 10.0));
        assert_eq!(wide.center, Vec2::new(100.0, 50.0));
        assert_eq!(wide.radius, 40.0);

        let tall = Circle::fit_in_rect(Rect::new(0.0, 0.0, 100.0, 200.0), Vec2::new(5.0, 10.0));
        assert_eq!(tall.radius, 45.0);
    }

    #[test]
    fn test_fit_circle_never_negative() {
        let circle = Circle::fit_in_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Vec2::splat(10.0));
        assert_eq!(circle.radius, 0.0);
    }
}
