//! glidechart - animated live charts
//!
//! This crate provides:
//! - A snapshot queue that blends pushed data into smooth per-frame values
//!   (static, dynamic and moving-window series)
//! - An immediate-mode context with identity scopes, persisted widget state,
//!   an active-widget token, tooltips and cursor requests
//! - Chart widgets (bars, lines, areas, pies, grids, text, sliders) drawn
//!   onto a host-provided [`Surface`]
//! - A frame driver with delta conditioning and dirty tracking
//!
//! # Example
//!
//! ```
//! use glidechart::{Chart, ChartConfig, LineStyle, SeriesKind, SeriesValue};
//!
//! let mut chart = Chart::new(ChartConfig::new(vec![SeriesKind::Dynamic]));
//! chart.on_render(|ui, frame| {
//!     let rect = ui.rect();
//!     ui.line_series(&LineStyle::default(), rect, &frame[0]);
//! });
//! chart.push(vec![SeriesValue::Dynamic(vec![1.0, 4.0, 2.0])]).unwrap();
//!
//! // Producers on other threads use a feed.
//! let feed = chart.feed();
//! std::thread::spawn(move || {
//!     feed.push(vec![SeriesValue::Dynamic(vec![2.0, 3.0, 5.0])]).unwrap();
//! })
//! .join()
//! .unwrap();
//! ```

// Data and blending
mod easing;
mod error;
pub mod queue;
pub mod series;

// Immediate-mode state
mod active;
mod context;
mod input;
pub mod state;

// Drawing
pub mod color;
pub mod geometry;
pub mod layout;
pub mod path;
pub mod surface;
pub mod widgets;

// Driver
mod chart;
mod config;
mod feed;
mod frame;

pub use active::ActiveWidget;
pub use chart::{Chart, TickOutcome};
pub use color::{Color, ColorSource, Palette};
pub use config::{BlendConfig, ChartConfig, FrameTimingConfig};
pub use context::{ImContext, TooltipRequest};
pub use easing::{move_toward, smooth_factor};
pub use error::ChartError;
pub use feed::{SnapshotFeed, Waker};
pub use frame::{FrameClock, FrameDelta};
pub use input::{PointerEdges, PointerEvent, PointerState};
pub use queue::SnapshotQueue;
pub use series::{
    Frame, MovingWindow, ResolvedSeries, ResolvedWindow, SeriesKind, SeriesValue, Snapshot,
    series_maximum,
};
pub use state::{IdPart, IdStack, WidgetPath, WidgetState};
pub use surface::{
    CursorIcon, Font, FontFamily, HAlign, Stroke, Surface, TextAnchor, TextStyle, VAlign,
};
pub use widgets::{
    AreaStyle, BarStyle, ChartUi, GridStyle, LineStyle, PieChartStyle, PieRingChartStyle,
    PieRingStyle, PieSectionStyle, RingRadius, SideLabelPieStyle, SliderStyle, Template,
    TextConfig, TooltipStyle, ValueFormat,
};

/// Re-exported so hosts and tests share the math types.
pub use glidechart_core::math::{Circle, Rect, Vec2, vec2};
