use glam::Vec2;
use glidechart_core::math::Rect;

use super::{ChartUi, Template};
use crate::surface::{Stroke, TextAnchor, TextStyle};

/// Options shared by the text helpers.
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Overrides the chart's text style.
    pub style: Option<TextStyle>,
    pub template: Template,
    /// Space between the text and the strike lines.
    pub strike_margin: f32,
    /// Distance between wrapped lines.
    pub line_height: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            style: None,
            template: Template::Plain,
            strike_margin: 5.0,
            line_height: 14.0,
        }
    }
}

impl TextConfig {
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }
}

impl ChartUi<'_> {
    fn resolve_text_style(&self, config: &TextConfig) -> TextStyle {
        config.style.unwrap_or(*self.text_style())
    }

    /// Draw `text` (after templating) centered on `pos`.
    pub fn text_centered_at(&mut self, config: &TextConfig, text: &str, pos: Vec2) {
        let style = self.resolve_text_style(config);
        let text = config.template.apply(text);
        self.surface().fill_text(&text, pos, TextAnchor::CENTER, &style);
    }

    /// Draw `text` centered in `rect` with a horizontal line either side of
    /// it, spanning the rect minus `strike_margin`.
    pub fn text_centered_striked(&mut self, config: &TextConfig, text: &str, rect: Rect) {
        let style = self.resolve_text_style(config);
        let text = config.template.apply(text);
        let center = rect.center();
        let margin = config.strike_margin;

        let surface = self.surface();
        surface.fill_text(&text, center, TextAnchor::CENTER, &style);

        let half_width = surface.measure_text(&text, &style.font).x * 0.5;
        let stroke = Stroke::new(1.0, style.color);
        surface.stroke_polyline(
            &[
                Vec2::new(rect.x + margin, center.y),
                Vec2::new(center.x - half_width - margin, center.y),
            ],
            false,
            stroke,
        );
        surface.stroke_polyline(
            &[
                Vec2::new(center.x + half_width + margin, center.y),
                Vec2::new(rect.right() - margin, center.y),
            ],
            false,
            stroke,
        );
    }

    /// Draw `text` word-wrapped to `max_width`, first line's baseline at
    /// `pos`. A single word wider than `max_width` gets a line of its own.
    /// Returns the number of lines drawn.
    pub fn wrap_text(&mut self, config: &TextConfig, text: &str, pos: Vec2, max_width: f32) -> usize {
        let style = self.resolve_text_style(config);
        let text = config.template.apply(text);

        let surface = self.surface();
        let mut line = String::new();
        let mut y = pos.y;
        let mut lines = 0;

        for (n, word) in text.split(' ').enumerate() {
            let candidate = format!("{line}{word} ");
            let width = surface.measure_text(&candidate, &style.font).x;
            if width > max_width && n > 0 {
                surface.fill_text(&line, Vec2::new(pos.x, y), TextAnchor::LEFT_BOTTOM, &style);
                lines += 1;
                line = format!("{word} ");
                y += config.line_height;
            } else {
                line = candidate;
            }
        }

        surface.fill_text(&line, Vec2::new(pos.x, y), TextAnchor::LEFT_BOTTOM, &style);
        lines + 1
    }
}
