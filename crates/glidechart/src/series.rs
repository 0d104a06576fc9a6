//! Series values and the per-kind interpolation laws.
//!
//! Every chart declares the [`SeriesKind`] of each series index up front.
//! Producers push [`Snapshot`]s holding one [`SeriesValue`] per series; the
//! compositor folds the queued snapshots into one [`ResolvedSeries`] each
//! frame:
//!
//! - **Static** values jump to the newest push.
//! - **Dynamic** values blend element-wise with an eased factor.
//! - **Moving** windows overlay the newer window onto the older one and blend
//!   the scroll offset.
//!
//! Settled operands are returned borrowed, so a quiet chart resolves without
//! allocating.

use std::borrow::Cow;

use crate::easing::smooth_factor;
use crate::error::ChartError;

/// How a series is blended between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Discrete: always the newest value.
    Static,
    /// Fixed-length values blended element-wise.
    Dynamic,
    /// A scrolling window of samples located by a fractional offset.
    Moving,
}

/// A scrolling window into a conceptually longer sample sequence.
///
/// `samples[0]` is sample number `floor(offset)`; the fractional part of the
/// offset is how far the view has scrolled past it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovingWindow {
    pub samples: Vec<f64>,
    pub offset: f64,
}

impl MovingWindow {
    /// Largest offset magnitude accepted by the queue. Past 2^53 an `f64`
    /// can no longer tell neighbouring sample indices apart.
    pub const MAX_OFFSET: f64 = 9_007_199_254_740_992.0;

    pub fn new(samples: Vec<f64>, offset: f64) -> Self {
        Self { samples, offset }
    }

    /// Whether the offset is finite and within [`Self::MAX_OFFSET`].
    pub fn has_valid_offset(&self) -> bool {
        self.offset.is_finite() && self.offset.abs() <= Self::MAX_OFFSET
    }

    /// Index of `samples[0]` in the full sequence.
    pub fn origin(&self) -> i64 {
        self.offset.floor() as i64
    }

    /// One past the index of the last sample.
    pub fn end(&self) -> i64 {
        self.origin().saturating_add(self.samples.len() as i64)
    }
}

/// The raw value of one series in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Static(Vec<f64>),
    Dynamic(Vec<f64>),
    Moving(MovingWindow),
}

impl SeriesValue {
    pub fn kind(&self) -> SeriesKind {
        match self {
            SeriesValue::Static(_) => SeriesKind::Static,
            SeriesValue::Dynamic(_) => SeriesKind::Dynamic,
            SeriesValue::Moving(_) => SeriesKind::Moving,
        }
    }

    /// A single static scalar.
    pub fn scalar(value: f64) -> Self {
        SeriesValue::Static(vec![value])
    }

    pub fn moving(samples: Vec<f64>, offset: f64) -> Self {
        SeriesValue::Moving(MovingWindow::new(samples, offset))
    }
}

/// One data push: a value per configured series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub series: Vec<SeriesValue>,
}

impl Snapshot {
    pub fn new(series: Vec<SeriesValue>) -> Self {
        Self { series }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl From<Vec<SeriesValue>> for Snapshot {
    fn from(series: Vec<SeriesValue>) -> Self {
        Self::new(series)
    }
}

/// A moving window after blending.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWindow<'a> {
    /// Union of the blended windows, oldest sample first.
    pub samples: Cow<'a, [f64]>,
    /// Blended scroll offset.
    pub offset: f64,
    /// Number of samples the settled window shows; renderers size their
    /// bars/intervals by this rather than by `samples.len()`.
    pub visible_len: usize,
}

impl ResolvedWindow<'_> {
    /// Sub-sample scroll position in `[0, 1)`.
    pub fn scroll_fraction(&self) -> f64 {
        self.offset.rem_euclid(1.0)
    }
}

/// A series as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSeries<'a> {
    Static(Cow<'a, [f64]>),
    Dynamic(Cow<'a, [f64]>),
    Moving(ResolvedWindow<'a>),
}

impl<'a> ResolvedSeries<'a> {
    pub fn kind(&self) -> SeriesKind {
        match self {
            ResolvedSeries::Static(_) => SeriesKind::Static,
            ResolvedSeries::Dynamic(_) => SeriesKind::Dynamic,
            ResolvedSeries::Moving(_) => SeriesKind::Moving,
        }
    }

    /// The values to draw, regardless of kind.
    pub fn values(&self) -> &[f64] {
        match self {
            ResolvedSeries::Static(values) | ResolvedSeries::Dynamic(values) => values,
            ResolvedSeries::Moving(window) => &window.samples,
        }
    }

    /// Sub-sample scroll for moving series, zero otherwise.
    pub fn scroll_fraction(&self) -> f64 {
        match self {
            ResolvedSeries::Moving(window) => window.scroll_fraction(),
            _ => 0.0,
        }
    }

    /// Number of slots the renderer should lay out.
    pub fn visible_len(&self) -> usize {
        match self {
            ResolvedSeries::Moving(window) => window.visible_len,
            _ => self.values().len(),
        }
    }

    pub fn as_moving(&self) -> Option<&ResolvedWindow<'a>> {
        match self {
            ResolvedSeries::Moving(window) => Some(window),
            _ => None,
        }
    }
}

/// The resolved output of one tick: one entry per configured series.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub series: Vec<ResolvedSeries<'a>>,
}

impl<'a> Frame<'a> {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResolvedSeries<'a>> {
        self.series.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedSeries<'a>> {
        self.series.iter()
    }
}

impl<'a> std::ops::Index<usize> for Frame<'a> {
    type Output = ResolvedSeries<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.series[index]
    }
}

/// Largest value of a series, or zero when all values are negative or the
/// series is empty.
pub fn series_maximum(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Blend two dynamic value vectors.
///
/// `factor >= 1` returns `b` untouched.
pub fn blend_dynamic<'a>(
    series: usize,
    a: Cow<'a, [f64]>,
    b: &'a [f64],
    factor: f64,
) -> Result<Cow<'a, [f64]>, ChartError> {
    if factor >= 1.0 {
        return Ok(Cow::Borrowed(b));
    }
    if a.len() != b.len() {
        return Err(ChartError::LengthMismatch {
            series,
            expected: a.len(),
            actual: b.len(),
        });
    }

    let factor_b = smooth_factor(factor);
    let factor_a = 1.0 - factor_b;
    Ok(Cow::Owned(
        a.iter()
            .zip(b)
            .map(|(a, b)| a * factor_a + b * factor_b)
            .collect(),
    ))
}

/// Accumulator for the moving-window fold.
///
/// `origin` is the integer sample index of `samples[0]` and is kept apart
/// from the blended `offset`, which may be fractional mid-blend.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBlend<'a> {
    pub samples: Cow<'a, [f64]>,
    pub origin: i64,
    pub offset: f64,
}

impl<'a> WindowBlend<'a> {
    pub fn from_window(window: &'a MovingWindow) -> Self {
        Self {
            samples: Cow::Borrowed(&window.samples),
            origin: window.origin(),
            offset: window.offset,
        }
    }

    fn end(&self) -> i64 {
        self.origin.saturating_add(self.samples.len() as i64)
    }
}

/// Overlay window `b` onto `a`, preferring `b` where both have samples, and
/// blend the offsets with the eased factor.
///
/// `factor >= 1` returns `b` untouched. A position inside the union covered
/// by neither window is a [`ChartError::WindowGap`].
pub fn blend_moving<'a>(
    series: usize,
    a: WindowBlend<'a>,
    b: &'a MovingWindow,
    factor: f64,
) -> Result<WindowBlend<'a>, ChartError> {
    if factor >= 1.0 {
        return Ok(WindowBlend::from_window(b));
    }

    let factor_b = smooth_factor(factor);
    let factor_a = 1.0 - factor_b;

    let b_origin = b.origin();
    let b_end = b.end();
    let start = a.origin.min(b_origin);
    let end = a.end().max(b_end);

    let mut samples = Vec::with_capacity((end - start).max(0) as usize);
    for position in start..end {
        let value = if position >= b_origin && position < b_end {
            b.samples[(position - b_origin) as usize]
        } else if position >= a.origin && position < a.end() {
            a.samples[(position - a.origin) as usize]
        } else {
            return Err(ChartError::WindowGap { series, position });
        };
        samples.push(value);
    }

    Ok(WindowBlend {
        samples: Cow::Owned(samples),
        origin: start,
        offset: a.offset * factor_a + b.offset * factor_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_dynamic_settled_borrows() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        let out = blend_dynamic(0, Cow::Borrowed(&a), &b, 1.0).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, &[1.0, 2.0]);
    }

    #[test]
    fn test_blend_dynamic_zero_factor_is_a() {
        let a = vec![3.0, 4.0];
        let b = vec![1.0, 2.0];
        let out = blend_dynamic(0, Cow::Borrowed(&a), &b, 0.0).unwrap();
        assert_eq!(&*out, &[3.0, 4.0]);
    }

    #[test]
    fn test_blend_dynamic_length_mismatch() {
        let a = vec![0.0];
        let b = vec![1.0, 2.0];
        let err = blend_dynamic(3, Cow::Borrowed(&a), &b, 0.5).unwrap_err();
        assert_eq!(
            err,
            ChartError::LengthMismatch {
                series: 3,
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_blend_moving_prefers_newer_where_overlapping() {
        let a = MovingWindow::new(vec![1.0, 2.0, 3.0, 4.0], 0.0);
        let b = MovingWindow::new(vec![20.0, 30.0, 40.0, 50.0], 1.0);
        let out = blend_moving(0, WindowBlend::from_window(&a), &b, 0.5).unwrap();

        assert_eq!(out.origin, 0);
        assert_eq!(&*out.samples, &[1.0, 20.0, 30.0, 40.0, 50.0]);
        assert!((out.offset - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_blend_moving_newer_window_behind() {
        let a = MovingWindow::new(vec![5.0, 6.0], 4.0);
        let b = MovingWindow::new(vec![1.0, 2.0, 3.0], 2.0);
        let out = blend_moving(0, WindowBlend::from_window(&a), &b, 0.25).unwrap();

        assert_eq!(out.origin, 2);
        assert_eq!(&*out.samples, &[1.0, 2.0, 3.0, 6.0]);
    }

    #[test]
    fn test_blend_moving_gap_is_rejected() {
        let a = MovingWindow::new(vec![1.0, 2.0], 0.0);
        let b = MovingWindow::new(vec![3.0, 4.0], 5.0);
        let err = blend_moving(7, WindowBlend::from_window(&a), &b, 0.5).unwrap_err();
        assert_eq!(
            err,
            ChartError::WindowGap {
                series: 7,
                position: 2
            }
        );
    }

    #[test]
    fn test_blend_moving_abutting_windows_are_fine() {
        let a = MovingWindow::new(vec![1.0, 2.0], 0.0);
        let b = MovingWindow::new(vec![3.0, 4.0], 2.0);
        let out = blend_moving(0, WindowBlend::from_window(&a), &b, 0.5).unwrap();
        assert_eq!(&*out.samples, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_blend_moving_settled_returns_newer() {
        let a = MovingWindow::new(vec![1.0, 2.0], 0.0);
        let b = MovingWindow::new(vec![3.0, 4.0], 1.0);
        let out = blend_moving(0, WindowBlend::from_window(&a), &b, 1.0).unwrap();
        assert!(matches!(out.samples, Cow::Borrowed(_)));
        assert_eq!(out.offset, 1.0);
        assert_eq!(out.origin, 1);
    }

    #[test]
    fn test_series_maximum() {
        assert_eq!(series_maximum(&[1.0, 7.5, 3.0]), 7.5);
        assert_eq!(series_maximum(&[-1.0, -2.0]), 0.0);
        assert_eq!(series_maximum(&[]), 0.0);
    }

    #[test]
    fn test_scroll_fraction_wraps_negative_offsets() {
        let window = ResolvedWindow {
            samples: Cow::Owned(vec![1.0]),
            offset: -0.25,
            visible_len: 1,
        };
        assert!((window.scroll_fraction() - 0.75).abs() < 1e-12);
    }
}
