use glam::Vec2;
use glidechart_core::math::Rect;

use crate::color::Color;
use crate::context::TooltipRequest;
use crate::surface::{Font, Stroke, Surface, TextAnchor, TextStyle};

/// Appearance of the tooltip box.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipStyle {
    pub font: Font,
    pub line_height: f32,
    pub padding: f32,
    /// Horizontal distance between the origin and the box.
    pub offset: f32,
    pub background: Color,
    pub border: Stroke,
    pub text_color: Color,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            font: Font::proportional(12.0),
            line_height: 14.0,
            padding: 5.0,
            offset: 20.0,
            background: Color::WHITE,
            border: Stroke::new(1.0, Color::BLACK),
            text_color: Color::BLACK,
        }
    }
}

/// Box for a tooltip whose widest line is `text_width` and which has
/// `lines` lines, placed right of `origin` inside `bounds`.
///
/// Boxes that would cross the right edge flip to the left of the origin;
/// boxes that would cross the bottom are moved up. The result is aligned
/// for crisp 1px borders.
pub fn tooltip_rect(
    origin: Vec2,
    text_width: f32,
    lines: usize,
    bounds: Vec2,
    style: &TooltipStyle,
) -> Rect {
    let size = Vec2::new(
        text_width + style.padding * 2.0,
        style.line_height * lines as f32 + style.padding * 2.0,
    );
    let mut pos = origin + Vec2::new(style.offset, 0.0);

    if pos.x + size.x >= bounds.x - 1.0 {
        pos.x = origin.x - style.offset - size.x;
    }
    if pos.y + size.y >= bounds.y {
        pos.y = bounds.y - size.y - 1.0;
    }

    Rect::from_pos_size(pos, size).align_to_stroke_pixels()
}

/// Draw `request` as a bordered multi-line box.
pub fn draw_tooltip(surface: &mut dyn Surface, request: &TooltipRequest, style: &TooltipStyle) {
    let lines: Vec<&str> = request.text.split('\n').collect();
    let text_width = lines
        .iter()
        .map(|line| surface.measure_text(line, &style.font).x)
        .fold(0.0f32, f32::max);

    let rect = tooltip_rect(request.origin, text_width, lines.len(), surface.size(), style);

    surface.fill_rect(rect, style.background);
    if style.border.is_visible() {
        surface.stroke_rect(rect, style.border);
    }

    let text_style = TextStyle {
        font: style.font,
        color: style.text_color,
    };
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(
            rect.x + style.padding,
            rect.y + style.padding + i as f32 * style.line_height,
        );
        surface.fill_text(line, pos, TextAnchor::LEFT_TOP, &text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_sits_right_of_origin() {
        let style = TooltipStyle::default();
        let rect = tooltip_rect(Vec2::new(50.0, 40.0), 30.0, 1, Vec2::new(400.0, 300.0), &style);
        assert_eq!(rect.x, 70.5);
        assert_eq!(rect.y, 40.5);
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 24.0);
    }

    #[test]
    fn test_tooltip_flips_left_at_right_edge() {
        let style = TooltipStyle::default();
        let rect = tooltip_rect(Vec2::new(380.0, 40.0), 30.0, 1, Vec2::new(400.0, 300.0), &style);
        // 380 - 20 - 40
        assert_eq!(rect.x, 320.5);
    }

    #[test]
    fn test_tooltip_clamped_at_bottom() {
        let style = TooltipStyle::default();
        let rect = tooltip_rect(Vec2::new(50.0, 290.0), 30.0, 2, Vec2::new(400.0, 300.0), &style);
        // 300 - (2 * 14 + 10) - 1
        assert_eq!(rect.y, 261.5);
        assert_eq!(rect.height, 38.0);
    }
}
