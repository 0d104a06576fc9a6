use glam::Vec2;

use super::{ChartUi, ValueFormat};
use crate::color::{Color, ColorSource};
use crate::surface::{Stroke, TextAnchor};

/// Horizontal value grid.
#[derive(Debug, Clone)]
pub struct GridStyle {
    pub minimum: f64,
    pub maximum: f64,
    /// Value distance between grid lines.
    pub interval: f64,
    /// Line color, resolved with the line's value and index.
    pub color: ColorSource,
    pub line_width: f32,
    pub label: ValueFormat,
    /// Gap between the labels and the lines.
    pub label_space: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            interval: 10.0,
            color: ColorSource::Solid(Color::from_hex(0x888888)),
            line_width: 1.0,
            label: ValueFormat::default(),
            label_space: 5.0,
        }
    }
}

impl GridStyle {
    pub fn with_range(mut self, minimum: f64, maximum: f64, interval: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self.interval = interval;
        self
    }
}

impl ChartUi<'_> {
    /// Grid lines from `minimum` (bottom) to `maximum` (top) every
    /// `interval`, each labelled in the `label_width` column left of the
    /// graph. Returns the number of lines drawn.
    pub fn horizontal_grid(
        &mut self,
        style: &GridStyle,
        pos: Vec2,
        label_width: f32,
        graph_width: f32,
        height: f32,
    ) -> usize {
        let range = style.maximum - style.minimum;
        if style.interval <= 0.0 || range <= 0.0 {
            tracing::debug!(
                minimum = style.minimum,
                maximum = style.maximum,
                interval = style.interval,
                "empty grid range"
            );
            return 0;
        }

        let graph_x = pos.x + label_width;
        let mut index = 0;
        loop {
            let value = style.minimum + style.interval * index as f64;
            if value >= style.maximum {
                break;
            }
            let y = pos.y + height * (1.0 - ((value - style.minimum) / range) as f32);
            self.grid_line(style, value, index, graph_x, graph_width, y);
            index += 1;
        }

        self.grid_line(style, style.maximum, index, graph_x, graph_width, pos.y);
        index + 1
    }

    fn grid_line(
        &mut self,
        style: &GridStyle,
        value: f64,
        index: usize,
        graph_x: f32,
        graph_width: f32,
        y: f32,
    ) {
        let stroke = Stroke::new(style.line_width, style.color.resolve(value, index));
        let text_style = *self.text_style();
        let label = style.label.format(value);

        let surface = self.surface();
        surface.stroke_polyline(
            &[Vec2::new(graph_x, y), Vec2::new(graph_x + graph_width, y)],
            false,
            stroke,
        );
        surface.fill_text(
            &label,
            Vec2::new(graph_x - style.label_space, y),
            TextAnchor::RIGHT_MIDDLE,
            &text_style,
        );
    }
}
