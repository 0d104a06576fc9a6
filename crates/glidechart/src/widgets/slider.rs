use glam::Vec2;
use glidechart_core::math::Rect;

use super::ChartUi;
use crate::color::Color;
use crate::state::IdPart;
use crate::surface::{CursorIcon, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub struct SliderStyle {
    pub track_color: Color,
    pub track_width: f32,
    pub knob_color: Color,
    pub knob_stroke: Stroke,
    pub knob_size: Vec2,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track_color: Color::from_hex(0xAAAAAA),
            track_width: 10.0,
            knob_color: Color::from_hex(0xCCCCCC),
            knob_stroke: Stroke::new(1.0, Color::from_hex(0x333333)),
            knob_size: Vec2::new(20.0, 10.0),
        }
    }
}

impl ChartUi<'_> {
    /// A vertical slider for `value` in `[min, max]`, `max` at the top.
    ///
    /// Pressing inside `rect` starts a drag that follows the pointer until
    /// the button is released, even outside the rect. The widget claims the
    /// active token as `slider.<id>`. Returns whether `value` changed.
    pub fn vertical_slider(
        &mut self,
        style: &SliderStyle,
        id: impl Into<IdPart>,
        value: &mut f64,
        range: (f64, f64),
        rect: Rect,
    ) -> bool {
        let (min, max) = range;
        let span = max - min;
        let knob = style.knob_size;
        let travel = (rect.height - knob.y).max(0.0);

        let mut factor = if span != 0.0 {
            (1.0 - (*value - min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let pointer = self.pointer_position();
        let inside = rect.contains(pointer);

        self.push_id("slider");
        let active = self.capture_drag(id, inside);
        self.pop_id(1);

        let mut changed = false;
        if active {
            factor = if travel > 0.0 {
                (((pointer.y - rect.y - knob.y * 0.5) / travel) as f64).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let new_value = (1.0 - factor) * span + min;
            changed = new_value != *value;
            *value = new_value;
            self.set_cursor(CursorIcon::Grabbing);
        } else if inside && self.pointer().is_over() && self.active_widget().is_none() {
            self.set_cursor(CursorIcon::Grab);
        }

        let track_x = rect.x + rect.width * 0.5;
        let track = Rect::new(
            track_x - style.track_width * 0.5,
            rect.y + knob.y * 0.5,
            style.track_width,
            travel,
        );
        let knob_center = Vec2::new(track_x, rect.y + knob.y * 0.5 + factor as f32 * travel);
        let knob_rect = Rect::from_pos_size(knob_center - knob * 0.5, knob);

        let surface = self.surface();
        surface.fill_rect(track, style.track_color);
        surface.fill_rect(knob_rect, style.knob_color);
        if style.knob_stroke.is_visible() {
            surface.stroke_rect(knob_rect, style.knob_stroke);
        }

        changed
    }
}
