//! Layout of pie charts with labels in side columns.
//!
//! Each label sits in a column left or right of the pie, at roughly the
//! height where its slice's bisector would leave the pie, and is connected
//! to the slice by a leader line that bends once. Labels on the same side
//! are spread apart so their text does not overlap.

use glam::Vec2;
use glidechart_core::math::{Circle, Rect};

use crate::geometry::{angle_to_vec, segment_angles};
use crate::surface::TextAnchor;

/// Axis components smaller than this are treated as zero when projecting.
const DEGENERATE_COMPONENT: f32 = 1e-6;

/// Text metrics the side-label layout works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    /// Minimum vertical distance between labels on one side.
    pub line_height: f32,
    /// Distance kept between labels and the top/bottom of the area.
    pub vertical_margin: f32,
    /// Gap between a leader line and its text.
    pub text_space: f32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            line_height: 12.0,
            vertical_margin: 12.0,
            text_space: 5.0,
        }
    }
}

/// Angular extent of one pie slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceAngles {
    pub start: f32,
    pub end: f32,
}

impl SliceAngles {
    pub fn sweep(&self) -> f32 {
        self.end - self.start
    }

    pub fn bisector(&self) -> f32 {
        (self.start + self.end) * 0.5
    }
}

/// Consecutive slices for `percents` (each in percent of a full turn),
/// starting at twelve o'clock plus `rotation`.
pub fn slice_angles(percents: &[f64], rotation: f32) -> Vec<SliceAngles> {
    let mut start_percent = 0.0f32;
    percents
        .iter()
        .map(|&percent| {
            let (start, end) = segment_angles(start_percent, percent as f32, rotation);
            start_percent += percent as f32;
            SliceAngles { start, end }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSide {
    Left,
    Right,
}

/// A positioned label.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    /// Index of the slice this label belongs to.
    pub index: usize,
    pub side: LabelSide,
    /// Leader line: circle edge, bend point, column end.
    pub leader: [Vec2; 3],
    pub text_pos: Vec2,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SideLabelLayout {
    pub circle: Circle,
    /// Labels ordered from the top of the area to the bottom.
    pub labels: Vec<PlacedLabel>,
}

struct Pending {
    index: usize,
    dir: Vec2,
    // Relative to the circle center.
    pos: Vec2,
}

impl Pending {
    fn side(&self) -> LabelSide {
        if self.dir.x < 0.0 {
            LabelSide::Left
        } else {
            LabelSide::Right
        }
    }
}

fn distance_along(extent: f32, component: f32) -> f32 {
    if component.abs() < DEGENERATE_COMPONENT {
        f32::INFINITY
    } else {
        extent / component
    }
}

/// Lay out a pie in `area` with one label per slice.
///
/// `widths[i]` is the measured width of slice `i`'s label; the widest label
/// decides how much room the side columns take.
pub fn layout_side_labels(
    area: Rect,
    slices: &[SliceAngles],
    widths: &[f32],
    metrics: LabelMetrics,
) -> SideLabelLayout {
    let widest = widths.iter().copied().fold(0.0f32, f32::max);
    let graph_rect = Rect::new(
        area.x + widest + 10.0,
        area.y,
        area.width - widest * 2.0 - 20.0,
        area.height,
    );
    let space = metrics.line_height + 10.0;
    let circle = Circle::fit_in_rect(graph_rect, Vec2::splat(space));

    let mid_x = area.x + area.width * 0.5;
    let left_column = mid_x - circle.radius - metrics.text_space * 2.0;
    let right_column = mid_x + circle.radius + metrics.text_space * 2.0;

    let mut pending: Vec<Pending> = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            let dir = angle_to_vec(slice.bisector());

            let side_x = if dir.x < 0.0 {
                left_column + metrics.text_space
            } else {
                right_column - metrics.text_space
            } - circle.center.x;

            let bound_y = if dir.y < 0.0 {
                area.y + metrics.vertical_margin
            } else {
                area.bottom() - metrics.vertical_margin
            } - circle.center.y;

            let distance = distance_along(side_x, dir.x).min(distance_along(bound_y, dir.y));
            Pending {
                index,
                dir,
                pos: Vec2::new(side_x, dir.y * distance),
            }
        })
        .collect();

    pending.sort_by(|a, b| a.dir.y.total_cmp(&b.dir.y));
    spread(&mut pending, metrics.line_height, circle.radius);

    let labels = pending
        .iter()
        .map(|label| place(label, circle, metrics))
        .collect();

    SideLabelLayout { circle, labels }
}

/// Push upper-half labels down (walking top to bottom) and lower-half
/// labels up (walking bottom to top) until same-side neighbours are at
/// least `line_height` apart.
fn spread(labels: &mut [Pending], line_height: f32, radius: f32) {
    let mut last_left: Option<f32> = None;
    let mut last_right: Option<f32> = None;
    for label in labels.iter_mut() {
        let last = match label.side() {
            LabelSide::Left => &mut last_left,
            LabelSide::Right => &mut last_right,
        };
        if let Some(previous) = *last
            && label.pos.y < 0.0
            && previous + line_height > label.pos.y
        {
            label.pos.y = (previous + line_height).min(radius);
        }
        *last = Some(label.pos.y);
    }

    let mut last_left: Option<f32> = None;
    let mut last_right: Option<f32> = None;
    for label in labels.iter_mut().rev() {
        let last = match label.side() {
            LabelSide::Left => &mut last_left,
            LabelSide::Right => &mut last_right,
        };
        if let Some(previous) = *last
            && label.pos.y > 0.0
            && previous - line_height < label.pos.y
        {
            label.pos.y = (previous - line_height).max(-radius);
        }
        *last = Some(label.pos.y);
    }
}

fn place(label: &Pending, circle: Circle, metrics: LabelMetrics) -> PlacedLabel {
    let side = label.side();

    // The bend sits on the bisector at the label's height, but never inside
    // the pie (spreading can move a label past its own slice).
    let bend_distance = distance_along(label.pos.y, label.dir.y);
    let bend_distance = if bend_distance.is_finite() {
        bend_distance.max(circle.radius)
    } else {
        circle.radius
    };

    let start = circle.center + label.dir * circle.radius;
    let bend = circle.center + label.dir * bend_distance;
    let end = circle.center + label.pos;

    let (text_offset, anchor) = match side {
        LabelSide::Left => (-metrics.text_space, TextAnchor::RIGHT_MIDDLE),
        LabelSide::Right => (metrics.text_space, TextAnchor::LEFT_MIDDLE),
    };

    PlacedLabel {
        index: label.index,
        side,
        leader: [start, bend, end],
        text_pos: end + Vec2::new(text_offset, 0.0),
        anchor,
    }
}
