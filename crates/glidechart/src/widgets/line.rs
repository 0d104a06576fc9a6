use glam::Vec2;
use glidechart_core::math::Rect;

use super::ChartUi;
use crate::color::Color;
use crate::path::{area_pieces, series_polyline};
use crate::series::{ResolvedSeries, series_maximum};
use crate::surface::Stroke;

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub stroke: Stroke,
    /// Join samples with horizontal-tangent curves instead of straight lines.
    pub smooth: bool,
    /// Value mapped to the top of the rect. Defaults to the series maximum.
    pub maximum: Option<f64>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke: Stroke::new(2.0, Color::rgba(0.0, 0.0, 0.0, 0.5)),
            smooth: false,
            maximum: None,
        }
    }
}

impl LineStyle {
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaStyle {
    pub fill: Color,
    pub outline: Stroke,
    pub smooth: bool,
    pub maximum: Option<f64>,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(0.0, 0.0, 0.0, 0.5),
            outline: Stroke::new(2.0, Color::BLACK),
            smooth: false,
            maximum: None,
        }
    }
}

impl AreaStyle {
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

/// Sample positions of `series` inside `rect`, first sample at the left edge
/// (minus the scroll of moving series) and `maximum` at the top.
///
/// Returns nothing for series with fewer than two slots.
pub(crate) fn sample_points(
    rect: Rect,
    series: &ResolvedSeries<'_>,
    maximum: Option<f64>,
) -> Vec<Vec2> {
    let values = series.values();
    let slots = series.visible_len();
    if slots < 2 || values.is_empty() {
        return Vec::new();
    }

    let maximum = maximum.unwrap_or_else(|| series_maximum(values));
    let scale_y = if maximum > 0.0 {
        rect.height / maximum as f32
    } else {
        0.0
    };
    let interval = rect.width / (slots - 1) as f32;
    let scroll = series.scroll_fraction() as f32;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Vec2::new(
                rect.x + (i as f32 - scroll) * interval,
                rect.bottom() - value as f32 * scale_y,
            )
        })
        .collect()
}

impl ChartUi<'_> {
    /// A line through the samples of `series`, clipped to `rect`.
    pub fn line_series(&mut self, style: &LineStyle, rect: Rect, series: &ResolvedSeries<'_>) {
        let points = sample_points(rect, series, style.maximum);
        if points.is_empty() {
            return;
        }
        let line = series_polyline(&points, style.smooth);
        self.with_clip(rect, |ui| {
            ui.surface().stroke_polyline(&line, false, style.stroke);
        });
    }

    /// The region between the samples of `series` and the bottom of `rect`,
    /// filled and outlined along the samples.
    pub fn area_series(&mut self, style: &AreaStyle, rect: Rect, series: &ResolvedSeries<'_>) {
        let points = sample_points(rect, series, style.maximum);
        if points.is_empty() {
            return;
        }
        let line = series_polyline(&points, style.smooth);
        let pieces = area_pieces(&line, rect.bottom());
        self.with_clip(rect, |ui| {
            ui.fill_pieces(&pieces, style.fill);
            if style.outline.is_visible() {
                ui.surface().stroke_polyline(&line, false, style.outline);
            }
        });
    }
}
