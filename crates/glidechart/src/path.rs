//! Path construction and flattening.
//!
//! Widgets describe outlines with canvas-style commands (move, line, cubic,
//! arc, close) and flatten them to polylines before handing them to a
//! [`crate::Surface`].

use std::f32::consts::TAU;

use glam::Vec2;

/// Maximum angle covered by one flattened arc segment.
const ARC_SEGMENT_ANGLE: f32 = TAU / 96.0;

/// Number of line segments a cubic is flattened into.
const CUBIC_SEGMENTS: usize = 16;

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Vec2,
    pub control1: Vec2,
    pub control2: Vec2,
    pub to: Vec2,
}

impl CubicBezier {
    pub fn new(from: Vec2, control1: Vec2, control2: Vec2, to: Vec2) -> Self {
        Self {
            from,
            control1,
            control2,
            to,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.from * mt3
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.to * t3
    }
}

/// Points along a circular arc from `start` to `end` (radians, clockwise
/// on screen when `end > start`), both endpoints included.
pub fn arc_points(center: Vec2, radius: f32, start: f32, end: f32) -> Vec<Vec2> {
    let sweep = end - start;
    let segments = ((sweep.abs() / ARC_SEGMENT_ANGLE).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f32 / segments as f32);
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// A flattened sub-path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

/// Builder for flattened paths.
///
/// ```
/// use glidechart::Vec2;
/// use glidechart::path::PathBuilder;
///
/// let mut path = PathBuilder::new();
/// path.move_to(Vec2::ZERO).line_to(Vec2::new(10.0, 0.0)).line_to(Vec2::new(10.0, 10.0));
/// let polylines = path.build();
/// assert_eq!(polylines[0].points.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    finished: Vec<Polyline>,
    current: Polyline,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_pos(&self) -> Option<Vec2> {
        self.current.points.last().copied()
    }

    fn flush(&mut self) {
        let current = std::mem::take(&mut self.current);
        if current.points.len() > 1 {
            self.finished.push(current);
        }
    }

    /// Start a new sub-path at `to`.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.flush();
        self.current.points.push(to);
        self
    }

    /// Line to `to`. Starts a sub-path if none is open.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.current.points.push(to);
        self
    }

    /// Cubic curve to `to`.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        let Some(from) = self.current_pos() else {
            return self.move_to(to);
        };
        let curve = CubicBezier::new(from, control1, control2, to);
        for i in 1..=CUBIC_SEGMENTS {
            self.current
                .points
                .push(curve.eval(i as f32 / CUBIC_SEGMENTS as f32));
        }
        self
    }

    /// Circular arc. Like a canvas `arc`, a line joins the current point to
    /// the arc's first point.
    pub fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) -> &mut Self {
        self.current
            .points
            .extend(arc_points(center, radius, start, end));
        self
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.current.closed = true;
        self.flush();
        self
    }

    /// Finish and return every sub-path with at least two points.
    pub fn build(mut self) -> Vec<Polyline> {
        self.flush();
        self.finished
    }
}

/// Points of a series line, optionally smoothed with horizontal-tangent
/// cubics between neighbouring samples.
pub fn series_polyline(points: &[Vec2], smooth: bool) -> Vec<Vec2> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut path = PathBuilder::new();
    path.move_to(first);
    let mut last = first;
    for &point in rest {
        if smooth {
            let center_x = (last.x + point.x) * 0.5;
            path.cubic_to(
                Vec2::new(center_x, last.y),
                Vec2::new(center_x, point.y),
                point,
            );
        } else {
            path.line_to(point);
        }
        last = point;
    }

    path.build()
        .into_iter()
        .next()
        .map(|polyline| polyline.points)
        .unwrap_or_else(|| vec![first])
}

// ==================== Convex decomposition ====================

/// Largest sweep of one wedge piece; anything up to π stays convex.
const MAX_CONVEX_SWEEP: f32 = std::f32::consts::FRAC_PI_2;

fn split_sweep(start: f32, end: f32) -> impl Iterator<Item = (f32, f32)> {
    let sweep = end - start;
    let pieces = ((sweep.abs() / MAX_CONVEX_SWEEP).ceil() as usize).max(1);
    let step = sweep / pieces as f32;
    (0..pieces).map(move |i| {
        let a = start + step * i as f32;
        (a, a + step)
    })
}

/// Convex polygons that together fill the wedge from `start` to `end`.
pub fn wedge_pieces(center: Vec2, radius: f32, start: f32, end: f32) -> Vec<Vec<Vec2>> {
    split_sweep(start, end)
        .map(|(a, b)| {
            let mut piece = Vec::with_capacity(16);
            piece.push(center);
            piece.extend(arc_points(center, radius, a, b));
            piece
        })
        .collect()
}

/// Convex quads that together fill the annular segment between
/// `inner_radius` and `outer_radius`.
pub fn ring_pieces(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    end: f32,
) -> Vec<[Vec2; 4]> {
    let outer = arc_points(center, outer_radius, start, end);
    let inner = arc_points(center, inner_radius, start, end);
    outer
        .windows(2)
        .zip(inner.windows(2))
        .map(|(o, i)| [i[0], o[0], o[1], i[1]])
        .collect()
}

/// Convex trapezoids between a left-to-right polyline and a horizontal
/// `baseline`. Points must lie on one side of the baseline.
pub fn area_pieces(points: &[Vec2], baseline: f32) -> Vec<[Vec2; 4]> {
    points
        .windows(2)
        .map(|w| {
            [
                w[0],
                w[1],
                Vec2::new(w[1].x, baseline),
                Vec2::new(w[0].x, baseline),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn is_convex(points: &[Vec2]) -> bool {
        let n = points.len();
        let mut sign = 0.0f32;
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let c = points[(i + 2) % n];
            let cross = (b - a).perp_dot(c - b);
            if cross.abs() < 1e-4 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    #[test]
    fn test_wedge_pieces_are_convex() {
        let pieces = wedge_pieces(Vec2::ZERO, 50.0, 0.0, 1.8 * PI);
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_eq!(piece[0], Vec2::ZERO);
            assert!(is_convex(piece));
        }
    }

    #[test]
    fn test_ring_pieces_cover_sweep() {
        let pieces = ring_pieces(Vec2::ZERO, 20.0, 40.0, 0.0, PI);
        assert!(!pieces.is_empty());
        let first = pieces[0];
        assert!((first[0] - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert!((first[1] - Vec2::new(40.0, 0.0)).length() < 1e-4);
        for piece in &pieces {
            assert!(is_convex(piece));
        }
    }

    #[test]
    fn test_area_pieces_reach_baseline() {
        let points = [Vec2::new(0.0, 10.0), Vec2::new(10.0, 5.0), Vec2::new(20.0, 8.0)];
        let pieces = area_pieces(&points, 50.0);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1][2], Vec2::new(20.0, 50.0));
        assert!(is_convex(&pieces[0]));
    }

    #[test]
    fn test_cubic_endpoints() {
        let curve = CubicBezier::new(
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
        );
        assert_eq!(curve.eval(0.0), Vec2::ZERO);
        assert_eq!(curve.eval(1.0), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_arc_points_stay_on_circle() {
        let points = arc_points(Vec2::new(10.0, 10.0), 5.0, 0.0, PI);
        assert!(points.len() > 2);
        for p in &points {
            assert!((p.distance(Vec2::new(10.0, 10.0)) - 5.0).abs() < 1e-4);
        }
        assert!((points[0] - Vec2::new(15.0, 10.0)).length() < 1e-4);
        assert!((points.last().unwrap().x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_to_splits_subpaths() {
        let mut path = PathBuilder::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::X)
            .move_to(Vec2::Y)
            .line_to(Vec2::ONE)
            .close();
        let polylines = path.build();
        assert_eq!(polylines.len(), 2);
        assert!(!polylines[0].closed);
        assert!(polylines[1].closed);
    }

    #[test]
    fn test_single_point_subpaths_are_dropped() {
        let mut path = PathBuilder::new();
        path.move_to(Vec2::ZERO).move_to(Vec2::X);
        assert!(path.build().is_empty());
    }

    #[test]
    fn test_series_polyline_smooth_passes_through_samples() {
        let samples = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0), Vec2::new(20.0, 0.0)];
        let smooth = series_polyline(&samples, true);
        assert_eq!(smooth.first(), Some(&samples[0]));
        assert!(smooth.contains(&samples[1]));
        assert_eq!(smooth.last(), Some(&samples[2]));

        let straight = series_polyline(&samples, false);
        assert_eq!(straight, samples.to_vec());
    }
}
