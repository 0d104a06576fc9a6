//! An egui widget that drives a [`Chart`].

use egui::{Response, Sense, Ui, Widget};
use glidechart::{Chart, Color, PointerEvent, Vec2};

use crate::surface::{EguiSurface, to_cursor_icon};

/// Shows a [`Chart`] and feeds it egui's pointer input.
///
/// Each time the widget is shown the chart ticks once, using egui's input
/// time as the timestamp. While the chart is blending or animating the
/// widget keeps requesting repaints; when it settles, egui goes idle until
/// new input or a [`install_waker`] wake-up arrives.
///
/// # Example
///
/// ```ignore
/// use glidechart_egui::ChartView;
///
/// ui.add(ChartView::new(&mut self.chart).min_size(egui::vec2(300.0, 200.0)));
/// ```
pub struct ChartView<'a> {
    chart: &'a mut Chart,
    min_size: egui::Vec2,
    background: Option<Color>,
}

impl<'a> ChartView<'a> {
    pub fn new(chart: &'a mut Chart) -> Self {
        Self {
            chart,
            min_size: egui::Vec2::new(200.0, 150.0),
            background: None,
        }
    }

    /// Set the minimum size of the widget.
    pub fn min_size(mut self, size: egui::Vec2) -> Self {
        self.min_size = size;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    fn forward_pointer(&mut self, ui: &Ui, response: &Response, rect: egui::Rect) {
        let over = response.contains_pointer();
        self.chart.pointer_event(if over {
            PointerEvent::Entered
        } else {
            PointerEvent::Left
        });

        let (position, any_down, pressed, released) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_down(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });

        if let Some(position) = position {
            self.chart.pointer_event(PointerEvent::Moved {
                position: Vec2::new(position.x - rect.min.x, position.y - rect.min.y),
                any_down,
            });
        }
        if pressed && over {
            self.chart.pointer_event(PointerEvent::Pressed);
        }
        if released {
            self.chart.pointer_event(PointerEvent::Released);
        }
    }
}

impl Widget for ChartView<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let desired_size = ui.available_size().max(self.min_size);
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        if !ui.is_rect_visible(rect) {
            return response;
        }

        self.forward_pointer(ui, &response, rect);

        let mut surface = EguiSurface::new(ui.painter(), rect);
        if let Some(background) = self.background {
            surface = surface.with_background(background);
        }

        let timestamp_ms = ui.input(|i| i.time) * 1000.0;
        let outcome = match self.chart.tick(timestamp_ms, &mut surface) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(%err, "chart tick failed");
                return response;
            }
        };

        // egui resets the cursor every frame, so the current request is
        // applied each time rather than only when it changes.
        let cursor = self.chart.context().cursor();
        if response.contains_pointer() || self.chart.context().active_widget().is_some() {
            ui.ctx().set_cursor_icon(to_cursor_icon(cursor));
        }

        if outcome.repaint {
            ui.ctx().request_repaint();
        }

        response
    }
}

/// Make pushes and feed snapshots wake egui.
pub fn install_waker(chart: &mut Chart, ctx: &egui::Context) {
    let ctx = ctx.clone();
    chart.set_waker(move || ctx.request_repaint());
}
