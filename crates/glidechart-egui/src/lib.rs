//! egui integration for glidechart.
//!
//! - [`EguiSurface`] implements [`glidechart::Surface`] on top of an egui
//!   `Painter`.
//! - [`ChartView`] is an egui widget that forwards pointer input, ticks the
//!   chart and requests repaints while it is animating.
//!
//! # Example
//!
//! ```ignore
//! use glidechart::{Chart, ChartConfig, SeriesKind};
//! use glidechart_egui::{ChartView, install_waker};
//!
//! let mut chart = Chart::new(ChartConfig::new(vec![SeriesKind::Dynamic]));
//! install_waker(&mut chart, ctx);
//!
//! egui::CentralPanel::default().show(ctx, |ui| {
//!     ui.add(ChartView::new(&mut chart));
//! });
//! ```

mod surface;
mod widget;

pub use surface::{EguiSurface, to_color32, to_cursor_icon};
pub use widget::{ChartView, install_waker};
