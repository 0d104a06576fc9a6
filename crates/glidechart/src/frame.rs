//! Frame timing.
//!
//! The host calls the chart once per display refresh with a monotonic
//! timestamp. [`FrameClock`] turns consecutive timestamps into a delta that
//! is safe to animate with: stalls and spikes are replaced by the previous
//! delta and the result is smoothed toward it, so one slow refresh never
//! shows up as a visible jump.

use crate::config::FrameTimingConfig;

/// Elapsed time for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Unconditioned time since the previous tick.
    pub raw_ms: f64,
    /// Delta after spike rejection and smoothing.
    pub conditioned_ms: f64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    config: FrameTimingConfig,
    last_timestamp: Option<f64>,
    last_delta: f64,
}

impl FrameClock {
    pub fn new(config: FrameTimingConfig) -> Self {
        Self {
            config,
            last_timestamp: None,
            last_delta: 0.0,
        }
    }

    /// Register a tick at `timestamp_ms` and return its delta.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameDelta {
        let raw = match self.last_timestamp {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        let conditioned = self.condition(raw);
        FrameDelta {
            raw_ms: raw,
            conditioned_ms: conditioned,
        }
    }

    fn condition(&mut self, raw: f64) -> f64 {
        let config = &self.config;
        let last = if self.last_delta <= 0.0 {
            config.fallback_delta_ms
        } else {
            self.last_delta
        };

        let mut delta = raw;
        if delta >= config.stall_ms || delta > last * config.spike_factor {
            delta = last;
        }
        delta += (last - delta) * config.smoothing;

        self.last_delta = delta;
        delta
    }

    /// Conditioned delta of the most recent tick.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Forget the previous timestamp, e.g. after the host stopped ticking.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FrameTimingConfig::default())
    }
}
