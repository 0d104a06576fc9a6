//! Test utilities for glidechart.
//!
//! [`RecordingSurface`] implements [`Surface`] by recording every call, so
//! tests can drive a [`glidechart::Chart`] without a real backend and then
//! assert on what was drawn.
//!
//! Text measurement is deterministic: a string is `chars * size * 0.5` wide
//! and `size` high.
//!
//! # Example
//!
//! ```rust
//! use glidechart::{Chart, ChartConfig, SeriesKind, SeriesValue};
//! use glidechart_test_utils::RecordingSurface;
//!
//! let mut chart = Chart::new(ChartConfig::new(vec![SeriesKind::Static]));
//! chart.on_render(|ui, frame| {
//!     let value = frame[0].values()[0];
//!     ui.surface().fill_text(
//!         &value.to_string(),
//!         glidechart::vec2(10.0, 10.0),
//!         glidechart::TextAnchor::LEFT_TOP,
//!         &glidechart::TextStyle::default(),
//!     );
//! });
//! chart.push(vec![SeriesValue::scalar(3.0)]).unwrap();
//!
//! let mut surface = RecordingSurface::new(200.0, 100.0);
//! chart.tick(0.0, &mut surface).unwrap();
//! assert_eq!(surface.texts(), vec!["3"]);
//! ```

use glidechart::{Color, Font, Rect, Stroke, Surface, TextAnchor, TextStyle, Vec2};

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    FillConvex {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokePolyline {
        points: Vec<Vec2>,
        closed: bool,
        stroke: Stroke,
    },
    FillText {
        text: String,
        pos: Vec2,
        anchor: TextAnchor,
        style: TextStyle,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

/// A [`Surface`] that records calls instead of drawing.
///
/// `clear` erases the recorded calls of the current frame, mirroring what a
/// real surface does with its pixels. Calls made before the last clear are
/// counted in [`RecordingSurface::clears`] only.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    calls: Vec<DrawCall>,
    clip_stack: Vec<Rect>,
    clears: usize,
    unbalanced_pops: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            calls: Vec::new(),
            clip_stack: Vec::new(),
            clears: 0,
            unbalanced_pops: 0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Calls recorded since the last clear.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of times the chart cleared the surface.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Clip rects pushed and not yet popped.
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// `pop_clip` calls without a matching push.
    pub fn unbalanced_pops(&self) -> usize {
        self.unbalanced_pops
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Position of the first text call drawing `text`.
    pub fn text_position(&self, text: &str) -> Option<Vec2> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::FillText { text: t, pos, .. } if t == text => Some(*pos),
            _ => None,
        })
    }

    pub fn fill_rects(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn stroke_rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::StrokeRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn convex_fills(&self) -> Vec<(&[Vec2], Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillConvex { points, color } => Some((points.as_slice(), *color)),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<&[Vec2]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::StrokePolyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Every point of every convex fill drawn in `color`.
    pub fn fill_points(&self, color: Color) -> Vec<Vec2> {
        self.convex_fills()
            .into_iter()
            .filter(|(_, c)| *c == color)
            .flat_map(|(points, _)| points.iter().copied())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(400.0, 300.0)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.calls.clear();
        self.clears += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.calls.push(DrawCall::StrokeRect { rect, stroke });
    }

    fn fill_convex(&mut self, points: &[Vec2], color: Color) {
        self.calls.push(DrawCall::FillConvex {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, stroke: Stroke) {
        self.calls.push(DrawCall::StrokePolyline {
            points: points.to_vec(),
            closed,
            stroke,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, style: &TextStyle) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            pos,
            anchor,
            style: *style,
        });
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * font.size * 0.5, font.size)
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.calls.push(DrawCall::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            self.unbalanced_pops += 1;
        }
        self.calls.push(DrawCall::PopClip);
    }
}
