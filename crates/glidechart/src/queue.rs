//! Ordered backlog of pushed snapshots and their blend progress.

use std::borrow::Cow;
use std::collections::VecDeque;

use glidechart_core::profiling::profile_function;

use crate::config::BlendConfig;
use crate::error::ChartError;
use crate::series::{
    blend_dynamic, blend_moving, Frame, MovingWindow, ResolvedSeries, ResolvedWindow, SeriesKind,
    SeriesValue, Snapshot, WindowBlend,
};

#[derive(Debug, Clone)]
struct QueuedSnapshot {
    snapshot: Snapshot,
    blend: f64,
}

/// Snapshots waiting for or undergoing their blend into the displayed frame.
///
/// Entries are ordered oldest to newest. After [`SnapshotQueue::advance`]
/// only the newest fully settled entry survives among the settled ones and
/// sits at index 0 as the base the rest blend onto.
#[derive(Debug)]
pub struct SnapshotQueue {
    kinds: Vec<SeriesKind>,
    config: BlendConfig,
    entries: VecDeque<QueuedSnapshot>,
    backlogged: bool,
}

impl SnapshotQueue {
    pub fn new(kinds: Vec<SeriesKind>, config: BlendConfig) -> Self {
        Self {
            kinds,
            config,
            entries: VecDeque::new(),
            backlogged: false,
        }
    }

    pub fn kinds(&self) -> &[SeriesKind] {
        &self.kinds
    }

    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Blend factor of every queued entry, oldest first.
    pub fn blend_factors(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|entry| entry.blend)
    }

    /// Whether the last [`SnapshotQueue::advance`] left more entries queued
    /// than the backlog limit allows.
    pub fn is_backlogged(&self) -> bool {
        self.backlogged
    }

    /// Whether any entry is still blending in.
    pub fn is_blending(&self) -> bool {
        self.entries.iter().any(|entry| entry.blend < 1.0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.backlogged = false;
    }

    /// Append a snapshot with blend factor 0.
    ///
    /// The snapshot is checked against the configured series kinds and
    /// against the newest queued snapshot: dynamic series must keep their
    /// length and moving windows must overlap or touch the previous window.
    /// On error nothing is queued.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), ChartError> {
        self.validate(&snapshot)?;
        self.entries.push_back(QueuedSnapshot {
            snapshot,
            blend: 0.0,
        });
        tracing::trace!(len = self.entries.len(), "snapshot queued");
        Ok(())
    }

    fn validate(&self, snapshot: &Snapshot) -> Result<(), ChartError> {
        if snapshot.len() != self.kinds.len() {
            return Err(ChartError::SeriesCountMismatch {
                expected: self.kinds.len(),
                actual: snapshot.len(),
            });
        }

        let previous = self.entries.back().map(|entry| &entry.snapshot);

        for (series, (value, expected)) in snapshot.series.iter().zip(&self.kinds).enumerate() {
            if value.kind() != *expected {
                return Err(ChartError::SeriesKindMismatch {
                    series,
                    expected: *expected,
                    actual: value.kind(),
                });
            }

            if let SeriesValue::Moving(window) = value
                && !window.has_valid_offset()
            {
                return Err(ChartError::InvalidWindowOffset {
                    series,
                    offset: window.offset,
                });
            }

            let Some(previous) = previous.and_then(|p| p.series.get(series)) else {
                continue;
            };

            match (previous, value) {
                (SeriesValue::Dynamic(old), SeriesValue::Dynamic(new)) if old.len() != new.len() => {
                    return Err(ChartError::LengthMismatch {
                        series,
                        expected: old.len(),
                        actual: new.len(),
                    });
                }
                (SeriesValue::Moving(old), SeriesValue::Moving(new)) => {
                    check_window_contiguous(series, old, new)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Advance every unsettled entry by `delta_ms` and prune settled ones.
    ///
    /// Returns whether any entry was still blending, i.e. whether the frame
    /// resolved next differs from the previous one and a redraw is owed.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        profile_function!();

        if delta_ms > self.config.suspend_threshold_ms {
            // Animation was suspended (e.g. a hidden window); skip straight
            // to the newest data instead of replaying the backlog.
            let dropped = self.entries.len().saturating_sub(1);
            if let Some(newest) = self.entries.pop_back() {
                self.entries.clear();
                self.entries.push_back(QueuedSnapshot {
                    blend: 1.0,
                    ..newest
                });
            }
            tracing::debug!(delta_ms, dropped, "large frame delta, collapsed snapshot queue");
            self.backlogged = false;
            return true;
        }

        let step = if self.config.window_ms > 0.0 {
            delta_ms / self.config.window_ms
        } else {
            1.0
        };

        let mut settled_index = 0;
        let mut blending = false;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.blend < 1.0 {
                entry.blend = (entry.blend + step).min(1.0);
                blending = true;
            }
            // Includes entries that settled in this pass.
            if entry.blend >= 1.0 {
                settled_index = index;
            }
        }

        if settled_index > 0 {
            self.entries.drain(..settled_index);
            tracing::trace!(pruned = settled_index, "pruned settled snapshots");
        }

        self.report_backlog(delta_ms);
        blending
    }

    fn report_backlog(&mut self, delta_ms: f64) {
        let len = self.entries.len();
        let backlogged = len > self.config.backlog_limit;
        if backlogged && !self.backlogged {
            tracing::warn!(
                len,
                delta_ms,
                "snapshot queue is lagging behind; lower the blend window or push less often"
            );
        } else if backlogged {
            tracing::debug!(len, delta_ms, "snapshot queue still backlogged");
        } else if self.backlogged {
            tracing::debug!(len, "snapshot queue caught up");
        }
        self.backlogged = backlogged;
    }

    /// Fold the queue into one resolved value per series.
    pub fn resolve(&self) -> Result<Frame<'_>, ChartError> {
        profile_function!();

        let base = self.entries.front().ok_or(ChartError::EmptyQueue)?;
        for entry in &self.entries {
            if entry.snapshot.len() != self.kinds.len() {
                return Err(ChartError::SeriesCountMismatch {
                    expected: self.kinds.len(),
                    actual: entry.snapshot.len(),
                });
            }
        }

        let series = self
            .kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| match kind {
                SeriesKind::Static => self.resolve_static(index),
                SeriesKind::Dynamic => self.resolve_dynamic(index, base),
                SeriesKind::Moving => self.resolve_moving(index, base),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Frame { series })
    }

    fn resolve_static(&self, series: usize) -> Result<ResolvedSeries<'_>, ChartError> {
        let newest = self.entries.back().ok_or(ChartError::EmptyQueue)?;
        match &newest.snapshot.series[series] {
            SeriesValue::Static(values) => Ok(ResolvedSeries::Static(Cow::Borrowed(values))),
            other => Err(kind_mismatch(series, SeriesKind::Static, other)),
        }
    }

    fn resolve_dynamic<'a>(
        &'a self,
        series: usize,
        base: &'a QueuedSnapshot,
    ) -> Result<ResolvedSeries<'a>, ChartError> {
        let mut acc = Cow::Borrowed(dynamic_values(series, base)?);
        for entry in self.entries.iter().skip(1) {
            acc = blend_dynamic(series, acc, dynamic_values(series, entry)?, entry.blend)?;
        }
        Ok(ResolvedSeries::Dynamic(acc))
    }

    fn resolve_moving<'a>(
        &'a self,
        series: usize,
        base: &'a QueuedSnapshot,
    ) -> Result<ResolvedSeries<'a>, ChartError> {
        let base_window = moving_window(series, base)?;
        let mut acc = WindowBlend::from_window(base_window);
        for entry in self.entries.iter().skip(1) {
            acc = blend_moving(series, acc, moving_window(series, entry)?, entry.blend)?;
        }
        Ok(ResolvedSeries::Moving(ResolvedWindow {
            samples: acc.samples,
            offset: acc.offset,
            visible_len: base_window.samples.len(),
        }))
    }
}

fn kind_mismatch(series: usize, expected: SeriesKind, value: &SeriesValue) -> ChartError {
    ChartError::SeriesKindMismatch {
        series,
        expected,
        actual: value.kind(),
    }
}

fn dynamic_values(series: usize, entry: &QueuedSnapshot) -> Result<&[f64], ChartError> {
    match &entry.snapshot.series[series] {
        SeriesValue::Dynamic(values) => Ok(values),
        other => Err(kind_mismatch(series, SeriesKind::Dynamic, other)),
    }
}

fn moving_window(series: usize, entry: &QueuedSnapshot) -> Result<&MovingWindow, ChartError> {
    match &entry.snapshot.series[series] {
        SeriesValue::Moving(window) => Ok(window),
        other => Err(kind_mismatch(series, SeriesKind::Moving, other)),
    }
}

fn check_window_contiguous(
    series: usize,
    old: &MovingWindow,
    new: &MovingWindow,
) -> Result<(), ChartError> {
    if new.origin() > old.end() {
        return Err(ChartError::WindowGap {
            series,
            position: old.end(),
        });
    }
    if old.origin() > new.end() {
        return Err(ChartError::WindowGap {
            series,
            position: new.end(),
        });
    }
    Ok(())
}
