//! The drawing surface the chart widgets paint onto.
//!
//! The engine never rasterises anything itself. Hosts implement [`Surface`]
//! for their backend (see `glidechart-egui` for an egui `Painter` backend).
//! Coordinates are chart-local: `(0, 0)` is the top-left of the chart area.
//!
//! Curves and arcs are flattened by [`crate::path`] before they reach the
//! surface, and fills are always split into convex pieces, so backends only
//! need convex polygon filling.

use glam::Vec2;
use glidechart_core::math::Rect;

use crate::color::Color;

/// Line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const NONE: Stroke = Stroke {
        width: 0.0,
        color: Color::TRANSPARENT,
    };

    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.a > 0.0
    }
}

/// Font family class; backends map these onto their own font sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

/// Font selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub family: FontFamily,
}

impl Font {
    pub const fn proportional(size: f32) -> Self {
        Self {
            size,
            family: FontFamily::Proportional,
        }
    }

    pub const fn monospace(size: f32) -> Self {
        Self {
            size,
            family: FontFamily::Monospace,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::proportional(12.0)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    Top,
    Middle,
    /// The anchor is the bottom of the text box.
    #[default]
    Bottom,
}

/// Where a text's anchor point sits on its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextAnchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl TextAnchor {
    pub const CENTER: TextAnchor = TextAnchor::new(HAlign::Center, VAlign::Middle);
    pub const LEFT_TOP: TextAnchor = TextAnchor::new(HAlign::Left, VAlign::Top);
    pub const LEFT_MIDDLE: TextAnchor = TextAnchor::new(HAlign::Left, VAlign::Middle);
    pub const RIGHT_MIDDLE: TextAnchor = TextAnchor::new(HAlign::Right, VAlign::Middle);
    pub const CENTER_BOTTOM: TextAnchor = TextAnchor::new(HAlign::Center, VAlign::Bottom);
    pub const LEFT_BOTTOM: TextAnchor = TextAnchor::new(HAlign::Left, VAlign::Bottom);

    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }
}

/// Text appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: Font::default(),
            color: Color::from_hex(0x333333),
        }
    }
}

/// Pointer cursor a widget asks the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    PointingHand,
    Grab,
    Grabbing,
    ResizeVertical,
    ResizeHorizontal,
}

/// Drawing capabilities a host provides.
///
/// Implementations are used for exactly one tick at a time and only from the
/// thread running the chart.
pub trait Surface {
    /// Size of the drawable chart area.
    fn size(&self) -> Vec2;

    /// Erase everything drawn so far this frame.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Fill a convex polygon. Callers never pass concave outlines.
    fn fill_convex(&mut self, points: &[Vec2], color: Color);

    /// Stroke connected line segments; `closed` joins the last point back to
    /// the first.
    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, stroke: Stroke);

    /// Draw single-line text with its anchor at `pos`.
    fn fill_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, style: &TextStyle);

    /// Size of `text` when laid out on a single line with `font`.
    fn measure_text(&mut self, text: &str, font: &Font) -> Vec2;

    /// Restrict drawing to `rect` (intersected with any enclosing clip)
    /// until the matching [`Surface::pop_clip`].
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);
}

/// Top-left corner of a text box of `size` anchored at `pos`.
///
/// Shared by backends that position text by its box rather than by anchor.
pub fn anchored_min(pos: Vec2, size: Vec2, anchor: TextAnchor) -> Vec2 {
    let x = match anchor.h {
        HAlign::Left => pos.x,
        HAlign::Center => pos.x - size.x * 0.5,
        HAlign::Right => pos.x - size.x,
    };
    let y = match anchor.v {
        VAlign::Top => pos.y,
        VAlign::Middle => pos.y - size.y * 0.5,
        VAlign::Bottom => pos.y - size.y,
    };
    Vec2::new(x, y)
}
