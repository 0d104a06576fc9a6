//! Chart widgets.
//!
//! Widgets are methods on [`ChartUi`], the handle a render callback gets
//! each tick. They draw immediately onto the tick's [`Surface`] and keep any
//! cross-frame state in the [`ImContext`] under their identity path.

mod bar;
mod grid;
mod line;
mod pie;
mod slider;
mod text;
mod tooltip;

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use glam::Vec2;
use glidechart_core::math::Rect;

use crate::color::Color;
use crate::context::ImContext;
use crate::path::Polyline;
use crate::surface::{Stroke, Surface, TextStyle};

pub use bar::BarStyle;
pub use grid::GridStyle;
pub use line::{AreaStyle, LineStyle};
pub use pie::{
    PieChartStyle, PieRingChartStyle, PieRingStyle, PieSectionStyle, RingRadius,
    SideLabelPieStyle,
};
pub use slider::SliderStyle;
pub use text::TextConfig;
pub use tooltip::{TooltipStyle, draw_tooltip, tooltip_rect};

/// Text transformation applied before drawing.
#[derive(Clone, Default)]
pub enum Template {
    /// Text as given.
    #[default]
    Plain,
    /// The first `@` is replaced by the text, e.g. `"@ %"`.
    Pattern(Cow<'static, str>),
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Template {
    pub fn pattern(pattern: impl Into<Cow<'static, str>>) -> Self {
        Template::Pattern(pattern.into())
    }

    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Template::Custom(Arc::new(f))
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Template::Plain => text.to_string(),
            Template::Pattern(pattern) => pattern.replacen('@', text, 1),
            Template::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Plain => f.write_str("Plain"),
            Template::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Template::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How a numeric value is turned into text.
#[derive(Clone)]
pub enum ValueFormat {
    /// Rounded to at most `decimals` places (trailing zeros dropped), then
    /// passed through `template`.
    Rounded { decimals: u32, template: Template },
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl ValueFormat {
    pub fn rounded(decimals: u32) -> Self {
        ValueFormat::Rounded {
            decimals,
            template: Template::Plain,
        }
    }

    pub fn with_template(decimals: u32, template: Template) -> Self {
        ValueFormat::Rounded { decimals, template }
    }

    pub fn custom(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        ValueFormat::Custom(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Rounded { decimals, template } => {
                template.apply(&round_to(value, *decimals).to_string())
            }
            ValueFormat::Custom(f) => f(value),
        }
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::rounded(2)
    }
}

impl fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueFormat::Rounded { decimals, template } => f
                .debug_struct("Rounded")
                .field("decimals", decimals)
                .field("template", template)
                .finish(),
            ValueFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Drawing handle passed to the render callback.
///
/// Dereferences to the chart's [`ImContext`], so identity, state, active
/// widget, animation and tooltip operations are available directly.
pub struct ChartUi<'a> {
    ctx: &'a mut ImContext,
    surface: &'a mut dyn Surface,
    text: TextStyle,
}

impl<'a> ChartUi<'a> {
    pub fn new(ctx: &'a mut ImContext, surface: &'a mut dyn Surface, text: TextStyle) -> Self {
        Self { ctx, surface, text }
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Default text style of the chart.
    pub fn text_style(&self) -> &TextStyle {
        &self.text
    }

    /// The whole chart area.
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.surface.size())
    }

    /// Run `f` with drawing clipped to `rect`.
    pub fn with_clip<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        self.surface.push_clip(rect);
        let result = f(self);
        self.surface.pop_clip();
        result
    }

    pub(crate) fn fill_pieces<P: AsRef<[Vec2]>>(&mut self, pieces: &[P], color: Color) {
        for piece in pieces {
            self.surface.fill_convex(piece.as_ref(), color);
        }
    }

    /// Stroke the output of a [`crate::path::PathBuilder`].
    pub fn stroke_path(&mut self, polylines: &[Polyline], stroke: Stroke) {
        for polyline in polylines {
            self.surface
                .stroke_polyline(&polyline.points, polyline.closed, stroke);
        }
    }
}

impl Deref for ChartUi<'_> {
    type Target = ImContext;

    fn deref(&self) -> &ImContext {
        &*self.ctx
    }
}

impl DerefMut for ChartUi<'_> {
    fn deref_mut(&mut self) -> &mut ImContext {
        &mut *self.ctx
    }
}
