use glam::Vec2;
use glidechart_core::math::Rect;

use super::{ChartUi, Template, ValueFormat};
use crate::color::{Color, ColorSource};
use crate::series::{ResolvedSeries, series_maximum};
use crate::surface::{TextAnchor, TextStyle};

/// Appearance of bar series.
#[derive(Debug, Clone)]
pub struct BarStyle {
    /// Horizontal space between bars.
    pub gap: f32,
    /// Value mapped to the top of the rect. Defaults to the series maximum.
    pub maximum: Option<f64>,
    /// Stretches the bar area horizontally (clipped to the rect).
    pub x_zoom_factor: f32,
    pub color: ColorSource,
    pub hover_color: ColorSource,
    /// Text shown above a hovered bar.
    pub hover_text: ValueFormat,
    pub tooltip: ValueFormat,
    pub text_color: Color,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            gap: 4.0,
            maximum: None,
            x_zoom_factor: 1.0,
            color: ColorSource::solarized(),
            hover_color: ColorSource::solarized(),
            hover_text: ValueFormat::with_template(0, Template::pattern("@%")),
            tooltip: ValueFormat::with_template(2, Template::pattern("@%")),
            text_color: Color::BLACK,
        }
    }
}

impl BarStyle {
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_color(mut self, color: impl Into<ColorSource>) -> Self {
        self.color = color.into();
        self
    }
}

/// Horizontal placement of bar slots for a series.
struct Slots {
    left: f32,
    width: f32,
    gap: f32,
    scroll: f32,
}

impl Slots {
    fn new(rect: Rect, style: &BarStyle, slot_count: usize, scroll: f64) -> Option<Self> {
        if slot_count == 0 {
            return None;
        }
        let width = rect.width * style.x_zoom_factor / slot_count as f32 - style.gap;
        Some(Self {
            left: rect.x,
            width,
            gap: style.gap,
            scroll: scroll as f32,
        })
    }

    fn x(&self, index: usize) -> f32 {
        self.left + (index as f32 - self.scroll) * (self.width + self.gap) + self.gap * 0.5
    }
}

fn scale_for(rect: Rect, maximum: f64) -> f64 {
    if maximum > 0.0 {
        rect.height as f64 / maximum
    } else {
        0.0
    }
}

impl ChartUi<'_> {
    /// Vertical bars, one per value, growing up from the bottom of `rect`.
    ///
    /// Moving series are laid out for their visible length and scrolled by
    /// the fractional part of their offset.
    pub fn bar_series(&mut self, style: &BarStyle, rect: Rect, series: &ResolvedSeries<'_>) {
        let values = series.values();
        let maximum = style.maximum.unwrap_or_else(|| series_maximum(values));
        let scale = scale_for(rect, maximum);
        let Some(slots) = Slots::new(rect, style, series.visible_len(), series.scroll_fraction())
        else {
            return;
        };

        self.with_clip(rect, |ui| {
            for (index, &value) in values.iter().enumerate() {
                let height = (value * scale) as f32;
                let size = Vec2::new(slots.width, height);
                ui.bar(style, slots.x(index), rect.bottom(), size, value, index);
            }
        });
    }

    /// Stacked bars: each consecutive group of `group_len` values forms one
    /// bar, first value at the bottom. Stack colors are picked by position
    /// within the group.
    pub fn stacked_bar_series(
        &mut self,
        style: &BarStyle,
        rect: Rect,
        series: &ResolvedSeries<'_>,
        group_len: usize,
    ) {
        if group_len == 0 {
            return;
        }
        let values = series.values();
        let maximum = style.maximum.unwrap_or_else(|| {
            values
                .chunks(group_len)
                .map(|group| group.iter().sum::<f64>())
                .fold(0.0, f64::max)
        });
        let scale = scale_for(rect, maximum);
        let slot_count = series.visible_len().div_ceil(group_len);
        let Some(slots) = Slots::new(rect, style, slot_count, series.scroll_fraction()) else {
            return;
        };

        self.with_clip(rect, |ui| {
            for (slot, group) in values.chunks(group_len).enumerate() {
                let x = slots.x(slot);
                let mut stacked = 0.0f32;
                for (index, &value) in group.iter().enumerate() {
                    let height = (value * scale).round() as f32;
                    ui.bar(
                        style,
                        x,
                        rect.bottom() - stacked,
                        Vec2::new(slots.width, height),
                        value,
                        index,
                    );
                    stacked += height;
                }
            }
        });
    }

    fn bar(&mut self, style: &BarStyle, x: f32, baseline: f32, size: Vec2, value: f64, index: usize) {
        let rect = Rect::new(x, baseline - size.y, size.x, size.y);
        let hover = self.hovered(rect);

        let color = if hover {
            style.hover_color.resolve(value, index)
        } else {
            style.color.resolve(value, index)
        };
        self.surface().fill_rect(rect, color);

        if hover {
            let text_style = TextStyle {
                color: style.text_color,
                ..*self.text_style()
            };
            let label = style.hover_text.format(value);
            self.surface().fill_text(
                &label,
                Vec2::new(rect.x + rect.width * 0.5, rect.y - 5.0),
                TextAnchor::CENTER_BOTTOM,
                &text_style,
            );
            let tooltip = style.tooltip.format(value);
            self.show_tooltip(tooltip, None);
        }
    }
}
