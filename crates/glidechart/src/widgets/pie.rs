use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use glidechart_core::math::Rect;

use super::ChartUi;
use crate::color::{Color, Palette};
use crate::geometry::{angle_radius_to_vec, segment_angles, wedge_contains};
use crate::layout::{LabelMetrics, layout_side_labels, slice_angles};
use crate::path::{ring_pieces, wedge_pieces};
use crate::surface::{Font, HAlign, Stroke, TextAnchor, TextStyle, VAlign};

/// Pop-out speed of hovered sections.
const CENTER_DISTANCE_SPEED: f64 = 10.0;

/// Offsets below this are drawn in place.
const MIN_CENTER_DISTANCE: f64 = 0.1;

/// One pie section.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSectionStyle {
    /// Shown in the tooltip (`name: value`) and as a side label.
    pub name: String,
    pub color: Color,
    pub hover_color: Color,
    /// Distance the section is pushed out along its bisector.
    pub center_distance: f64,
    /// Distance while hovered.
    pub hover_center_distance: f64,
}

impl Default for PieSectionStyle {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::BLUE,
            hover_color: Color::RED,
            center_distance: 0.0,
            hover_center_distance: 10.0,
        }
    }
}

impl PieSectionStyle {
    pub fn named(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            ..Default::default()
        }
    }
}

/// Style for the section at `index`, falling back to a palette color.
fn section_style(parts: &[PieSectionStyle], index: usize) -> Cow<'_, PieSectionStyle> {
    match parts.get(index) {
        Some(part) => Cow::Borrowed(part),
        None => {
            let color = Palette::SOLARIZED[index % Palette::SOLARIZED.len()];
            Cow::Owned(PieSectionStyle {
                color,
                ..Default::default()
            })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieChartStyle {
    pub parts: Vec<PieSectionStyle>,
    /// Added to every angle; zero starts the first section at twelve o'clock.
    pub rotation: f32,
}

/// One ring segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PieRingStyle {
    /// Drawn outside the ring when not empty.
    pub name: String,
    pub color: Color,
    pub center_distance: f32,
    /// Gap between the outer edge and the name.
    pub text_distance: f32,
}

impl Default for PieRingStyle {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::BLUE,
            center_distance: 0.0,
            text_distance: 10.0,
        }
    }
}

/// A ring radius, fixed or derived per segment.
#[derive(Clone)]
pub enum RingRadius {
    Fixed(f32),
    /// Fraction of the chart radius.
    Fraction(f32),
    /// Computed from `(chart radius, index, value)`.
    Custom(Arc<dyn Fn(f32, usize, f64) -> f32 + Send + Sync>),
}

impl RingRadius {
    pub fn custom(f: impl Fn(f32, usize, f64) -> f32 + Send + Sync + 'static) -> Self {
        RingRadius::Custom(Arc::new(f))
    }

    pub fn resolve(&self, radius: f32, index: usize, value: f64) -> f32 {
        match self {
            RingRadius::Fixed(r) => *r,
            RingRadius::Fraction(f) => radius * f,
            RingRadius::Custom(f) => f(radius, index, value),
        }
    }
}

impl fmt::Debug for RingRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingRadius::Fixed(r) => f.debug_tuple("Fixed").field(r).finish(),
            RingRadius::Fraction(r) => f.debug_tuple("Fraction").field(r).finish(),
            RingRadius::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieRingChartStyle {
    pub outer_radius: RingRadius,
    pub inner_radius: RingRadius,
    pub parts: Vec<PieRingStyle>,
    /// Percent taken off the end of every segment.
    pub gap: f64,
}

impl Default for PieRingChartStyle {
    fn default() -> Self {
        Self {
            outer_radius: RingRadius::Fraction(1.0),
            inner_radius: RingRadius::Fraction(0.5),
            parts: Vec::new(),
            gap: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SideLabelPieStyle {
    pub parts: Vec<PieSectionStyle>,
    pub rotation: f32,
    pub metrics: LabelMetrics,
    pub leader: Stroke,
}

impl Default for SideLabelPieStyle {
    fn default() -> Self {
        Self {
            parts: Vec::new(),
            rotation: 0.0,
            metrics: LabelMetrics::default(),
            leader: Stroke::new(1.0, Color::from_hex(0x333333)),
        }
    }
}

impl ChartUi<'_> {
    /// A pie wedge from `start` to `end` (radians).
    ///
    /// Hovering shows a `name: value` tooltip and pushes the wedge out; the
    /// push-out distance animates and is kept in the widget state under
    /// `center_distance`. Returns whether the wedge is hovered.
    pub fn pie_section(
        &mut self,
        style: &PieSectionStyle,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        value: f64,
    ) -> bool {
        let pointer = self.pointer();
        let hover = pointer.is_over()
            && wedge_contains(pointer.position(), center, radius, start, end - start);

        let (target, color) = if hover {
            self.show_tooltip(format!("{}: {}", style.name, value), None);
            (style.hover_center_distance, style.hover_color)
        } else {
            (style.center_distance, style.color)
        };

        let current = self.get_state("center_distance", style.center_distance);
        let distance = self.move_toward(current, target, CENTER_DISTANCE_SPEED);
        self.set_state("center_distance", distance);

        let center = if distance > MIN_CENTER_DISTANCE {
            center + angle_radius_to_vec((start + end) * 0.5, distance as f32)
        } else {
            center
        };

        let pieces = wedge_pieces(center, radius, start, end);
        self.fill_pieces(&pieces, color);
        hover
    }

    /// A pie of `values`, each section sized by its share of the total.
    /// Sections are scoped under `pie.<index>`; non-positive values are
    /// skipped.
    pub fn pie_chart(&mut self, style: &PieChartStyle, values: &[f64], center: Vec2, radius: f32) {
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return;
        }

        self.push_id("pie");
        let mut start_percent = 0.0f32;
        for (index, &value) in values.iter().enumerate() {
            let percent = (value * 100.0 / total) as f32;
            if percent <= 0.0 {
                continue;
            }
            let (start, end) = segment_angles(start_percent, percent, style.rotation);
            let part = section_style(&style.parts, index);
            self.push_id(index);
            self.pie_section(&part, center, radius, start, end, value);
            self.pop_id(1);
            start_percent += percent;
        }
        self.pop_id(1);
    }

    /// An annular segment covering `[start_percent, start_percent + percent)`
    /// of a full turn.
    pub fn pie_ring(
        &mut self,
        style: &PieRingStyle,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        start_percent: f32,
        percent: f32,
    ) {
        let (start, end) = segment_angles(start_percent, percent, 0.0);
        let bisector = (start + end) * 0.5;
        let center = if style.center_distance > 0.0 {
            center + angle_radius_to_vec(bisector, style.center_distance)
        } else {
            center
        };

        let pieces = ring_pieces(center, inner_radius, outer_radius, start, end);
        self.fill_pieces(&pieces, style.color);

        if !style.name.is_empty() {
            let distance = outer_radius + style.text_distance + style.center_distance;
            self.pie_section_text(&style.name, center, bisector, distance);
        }
    }

    /// Rings for `values` given in percent. `gap` percent is taken off the
    /// end of each segment.
    pub fn pie_ring_chart(
        &mut self,
        style: &PieRingChartStyle,
        values: &[f64],
        center: Vec2,
        radius: f32,
    ) {
        let mut start_percent = 0.0f32;
        for (index, &value) in values.iter().enumerate() {
            let outer = style.outer_radius.resolve(radius, index, value);
            let inner = style.inner_radius.resolve(radius, index, value);
            let part = style.parts.get(index).cloned().unwrap_or_else(|| PieRingStyle {
                color: Palette::SOLARIZED[index % Palette::SOLARIZED.len()],
                ..Default::default()
            });
            let percent = (value - style.gap).max(0.0) as f32;
            self.pie_ring(&part, center, inner, outer, start_percent, percent);
            start_percent += value as f32;
        }
    }

    /// A pie of `values` (in percent) with every section's name in a column
    /// beside the pie, joined to its section by a leader line.
    pub fn pie_chart_with_side_labels(
        &mut self,
        style: &SideLabelPieStyle,
        values: &[f64],
        rect: Rect,
    ) {
        let font = Font {
            size: style.metrics.line_height,
            ..self.text_style().font
        };
        let text_style = TextStyle {
            font,
            ..*self.text_style()
        };

        let slices = slice_angles(values, style.rotation);
        let names: Vec<Cow<'_, PieSectionStyle>> = (0..values.len())
            .map(|index| section_style(&style.parts, index))
            .collect();
        let widths: Vec<f32> = names
            .iter()
            .map(|part| self.surface().measure_text(&part.name, &font).x)
            .collect();

        let layout = layout_side_labels(rect, &slices, &widths, style.metrics);

        for label in &layout.labels {
            self.surface()
                .stroke_polyline(&label.leader, false, style.leader);
            self.surface().fill_text(
                &names[label.index].name,
                label.text_pos,
                label.anchor,
                &text_style,
            );
        }

        let circle = layout.circle;
        self.push_id("pie");
        for (index, (slice, &value)) in slices.iter().zip(values).enumerate() {
            self.push_id(index);
            let part = &names[index];
            self.pie_section(part, circle.center, circle.radius, slice.start, slice.end, value);
            self.pop_id(1);
        }
        self.pop_id(1);
    }

    fn pie_section_text(&mut self, text: &str, center: Vec2, angle: f32, distance: f32) {
        let pos = center + angle_radius_to_vec(angle, distance);
        let h = if pos.x < center.x - 5.0 {
            HAlign::Right
        } else if pos.x > center.x + 5.0 {
            HAlign::Left
        } else {
            HAlign::Center
        };
        let style = *self.text_style();
        self.surface()
            .fill_text(text, pos, TextAnchor::new(h, VAlign::Middle), &style);
    }
}
