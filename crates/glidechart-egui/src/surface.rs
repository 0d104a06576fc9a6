//! [`Surface`] backed by an egui [`Painter`].

use egui::{Align, Align2, Color32, FontId, Painter, Pos2, Shape, StrokeKind};
use glidechart::{
    Color, CursorIcon, Font, FontFamily, HAlign, Rect, Stroke, Surface, TextAnchor, TextStyle,
    VAlign, Vec2,
};

/// Paints chart-local coordinates into a screen rect of an egui painter.
pub struct EguiSurface {
    painter: Painter,
    rect: egui::Rect,
    background: Option<Color32>,
    clip_stack: Vec<egui::Rect>,
}

impl EguiSurface {
    /// `rect` is the screen area the chart occupies; drawing is clipped to it.
    pub fn new(painter: &Painter, rect: egui::Rect) -> Self {
        Self {
            painter: painter.with_clip_rect(rect),
            rect,
            background: None,
            clip_stack: Vec::new(),
        }
    }

    /// Fill the chart area with `color` on every clear.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(to_color32(color));
        self
    }

    fn to_screen(&self, point: Vec2) -> Pos2 {
        Pos2::new(self.rect.min.x + point.x, self.rect.min.y + point.y)
    }

    fn to_screen_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.to_screen(Vec2::new(rect.x, rect.y)),
            egui::vec2(rect.width, rect.height),
        )
    }

    fn points(&self, points: &[Vec2]) -> Vec<Pos2> {
        points.iter().map(|p| self.to_screen(*p)).collect()
    }
}

impl Surface for EguiSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self) {
        // egui repaints from scratch every frame; only the background is ours.
        if let Some(background) = self.background {
            self.painter.rect_filled(self.rect, 0.0, background);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter
            .rect_filled(self.to_screen_rect(rect), 0.0, to_color32(color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.painter.rect_stroke(
            self.to_screen_rect(rect),
            0.0,
            to_egui_stroke(stroke),
            StrokeKind::Middle,
        );
    }

    fn fill_convex(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.painter.add(Shape::convex_polygon(
            self.points(points),
            to_color32(color),
            egui::Stroke::NONE,
        ));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        let points = self.points(points);
        let stroke = to_egui_stroke(stroke);
        let shape = if closed {
            Shape::closed_line(points, stroke)
        } else {
            Shape::line(points, stroke)
        };
        self.painter.add(shape);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, style: &TextStyle) {
        self.painter.text(
            self.to_screen(pos),
            to_align2(anchor),
            text,
            to_font_id(&style.font),
            to_color32(style.color),
        );
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> Vec2 {
        let galley =
            self.painter
                .layout_no_wrap(text.to_string(), to_font_id(font), Color32::WHITE);
        let size = galley.size();
        Vec2::new(size.x, size.y)
    }

    fn push_clip(&mut self, rect: Rect) {
        let previous = self.painter.clip_rect();
        self.clip_stack.push(previous);
        let clip = previous.intersect(self.to_screen_rect(rect));
        self.painter.set_clip_rect(clip);
    }

    fn pop_clip(&mut self) {
        match self.clip_stack.pop() {
            Some(previous) => self.painter.set_clip_rect(previous),
            None => tracing::warn!("pop_clip without matching push_clip"),
        }
    }
}

pub fn to_color32(color: Color) -> Color32 {
    let [r, g, b, a] = color.to_rgba_u8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn to_egui_stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, to_color32(stroke.color))
}

fn to_font_id(font: &Font) -> FontId {
    match font.family {
        FontFamily::Proportional => FontId::proportional(font.size),
        FontFamily::Monospace => FontId::monospace(font.size),
    }
}

fn to_align2(anchor: TextAnchor) -> Align2 {
    let h = match anchor.h {
        HAlign::Left => Align::Min,
        HAlign::Center => Align::Center,
        HAlign::Right => Align::Max,
    };
    let v = match anchor.v {
        VAlign::Top => Align::Min,
        VAlign::Middle => Align::Center,
        VAlign::Bottom => Align::Max,
    };
    Align2([h, v])
}

pub fn to_cursor_icon(cursor: CursorIcon) -> egui::CursorIcon {
    match cursor {
        CursorIcon::Default => egui::CursorIcon::Default,
        CursorIcon::PointingHand => egui::CursorIcon::PointingHand,
        CursorIcon::Grab => egui::CursorIcon::Grab,
        CursorIcon::Grabbing => egui::CursorIcon::Grabbing,
        CursorIcon::ResizeVertical => egui::CursorIcon::ResizeVertical,
        CursorIcon::ResizeHorizontal => egui::CursorIcon::ResizeHorizontal,
    }
}
