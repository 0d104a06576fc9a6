//! Error types for the blending engine.

use std::fmt;

use crate::series::SeriesKind;

/// Precondition failures raised by the snapshot queue, the compositor and
/// the identity stack.
///
/// These indicate a caller or configuration bug. The failing operation is
/// aborted and nothing is partially applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// `resolve` was called before anything was pushed.
    EmptyQueue,

    /// A snapshot carried a different number of series than configured.
    SeriesCountMismatch { expected: usize, actual: usize },

    /// A series value does not match the kind declared for its index.
    SeriesKindMismatch {
        series: usize,
        expected: SeriesKind,
        actual: SeriesKind,
    },

    /// Two dynamic snapshots of the same series differ in length.
    LengthMismatch {
        series: usize,
        expected: usize,
        actual: usize,
    },

    /// A moving window position is covered by neither blended window.
    WindowGap { series: usize, position: i64 },

    /// A moving window offset is not finite or too large to index samples.
    InvalidWindowOffset { series: usize, offset: f64 },

    /// `pop_id` asked for more entries than the identity stack holds.
    IdStackUnderflow { requested: usize, available: usize },

    /// A feed pushed after its chart was dropped.
    FeedDisconnected,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::EmptyQueue => write!(f, "Snapshot queue is empty, nothing to resolve"),
            ChartError::SeriesCountMismatch { expected, actual } => write!(
                f,
                "Snapshot has {} series but the chart is configured for {}",
                actual, expected
            ),
            ChartError::SeriesKindMismatch {
                series,
                expected,
                actual,
            } => write!(
                f,
                "Series {} was declared {:?} but received a {:?} value",
                series, expected, actual
            ),
            ChartError::LengthMismatch {
                series,
                expected,
                actual,
            } => write!(
                f,
                "Dynamic series {} changed length from {} to {}",
                series, expected, actual
            ),
            ChartError::WindowGap { series, position } => write!(
                f,
                "Moving series {} has no sample for position {} (windows do not overlap)",
                series, position
            ),
            ChartError::InvalidWindowOffset { series, offset } => write!(
                f,
                "Moving series {} has unusable window offset {}",
                series, offset
            ),
            ChartError::IdStackUnderflow {
                requested,
                available,
            } => write!(
                f,
                "Cannot pop {} ids from an identity stack of depth {}",
                requested, available
            ),
            ChartError::FeedDisconnected => {
                write!(f, "Snapshot feed is disconnected, the chart was dropped")
            }
        }
    }
}

impl std::error::Error for ChartError {}
