//! Chart configuration.

use crate::series::SeriesKind;
use crate::surface::TextStyle;

/// How snapshots blend into each other.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendConfig {
    /// Time for a pushed snapshot to blend fully in.
    pub window_ms: f64,
    /// A single delta above this is treated as a suspended animation and the
    /// queue jumps straight to the newest snapshot.
    pub suspend_threshold_ms: f64,
    /// Queue lengths above this are reported as a backlog.
    pub backlog_limit: usize,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            window_ms: 500.0,
            suspend_threshold_ms: 1000.0,
            backlog_limit: 3,
        }
    }
}

/// Delta-time conditioning for the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTimingConfig {
    /// Delta assumed before any frame has been measured.
    pub fallback_delta_ms: f64,
    /// Raw deltas at or above this are replaced by the previous delta.
    pub stall_ms: f64,
    /// Raw deltas more than this multiple of the previous one are spikes and
    /// are replaced by the previous delta.
    pub spike_factor: f64,
    /// How strongly the conditioned delta sticks to the previous one
    /// (0 = raw delta, 1 = never changes).
    pub smoothing: f64,
}

impl Default for FrameTimingConfig {
    fn default() -> Self {
        Self {
            fallback_delta_ms: 16.66,
            stall_ms: 1000.0,
            spike_factor: 6.0,
            smoothing: 0.8,
        }
    }
}

/// Configuration for a [`crate::Chart`].
///
/// # Example
///
/// ```
/// use glidechart::{ChartConfig, SeriesKind};
///
/// let config = ChartConfig::new(vec![SeriesKind::Dynamic, SeriesKind::Moving])
///     .with_blend_window(250.0)
///     .with_dirty_tracking(false);
/// assert_eq!(config.series.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Kind of each series index, fixed for the chart's life.
    pub series: Vec<SeriesKind>,
    pub blend: BlendConfig,
    pub timing: FrameTimingConfig,
    /// Only ask for frames while something is changing.
    pub dirty_tracking: bool,
    /// Default text style for widgets that do not override it.
    pub text: TextStyle,
}

impl ChartConfig {
    pub fn new(series: Vec<SeriesKind>) -> Self {
        Self {
            series,
            blend: BlendConfig::default(),
            timing: FrameTimingConfig::default(),
            dirty_tracking: true,
            text: TextStyle::default(),
        }
    }

    pub fn with_blend_window(mut self, window_ms: f64) -> Self {
        self.blend.window_ms = window_ms;
        self
    }

    pub fn with_blend(mut self, blend: BlendConfig) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_timing(mut self, timing: FrameTimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_dirty_tracking(mut self, enabled: bool) -> Self {
        self.dirty_tracking = enabled;
        self
    }

    pub fn with_text_style(mut self, text: TextStyle) -> Self {
        self.text = text;
        self
    }
}
