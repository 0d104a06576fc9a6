//! Per-chart immediate-mode context.
//!
//! [`ImContext`] outlives individual frames and carries everything widget
//! code needs between them: the identity stack, persisted widget state, the
//! active-widget token, the pointer snapshot for the current tick, and the
//! tooltip and cursor requests made while rendering.

use glam::Vec2;
use glidechart_core::math::Rect;

use crate::active::ActiveWidget;
use crate::easing;
use crate::error::ChartError;
use crate::input::PointerState;
use crate::state::{IdPart, IdStack, WidgetPath, WidgetState};
use crate::surface::CursorIcon;

/// Smallest remaining distance that still counts as animating.
const SETTLED_EPSILON: f64 = 0.001;

/// Tooltip queued during a tick, drawn after the render callback.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRequest {
    /// Text, `\n` separating lines.
    pub text: String,
    /// Point the tooltip box is placed next to.
    pub origin: Vec2,
}

#[derive(Debug)]
pub struct ImContext {
    ids: IdStack,
    state: WidgetState,
    active: ActiveWidget,
    pointer: PointerState,
    delta_ms: f64,
    size: Vec2,
    tooltip: Option<TooltipRequest>,
    cursor: CursorIcon,
    applied_cursor: CursorIcon,
    animating: bool,
}

impl Default for ImContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ImContext {
    pub fn new() -> Self {
        Self {
            ids: IdStack::new(),
            state: WidgetState::new(),
            active: ActiveWidget::new(),
            pointer: PointerState::new(),
            delta_ms: 0.0,
            size: Vec2::ZERO,
            tooltip: None,
            cursor: CursorIcon::Default,
            applied_cursor: CursorIcon::Default,
            animating: false,
        }
    }

    /// Reset per-tick requests before the render callback runs.
    pub(crate) fn begin_frame(&mut self, delta_ms: f64, size: Vec2) {
        self.delta_ms = delta_ms;
        self.size = size;
        self.cursor = CursorIcon::Default;
        self.animating = false;
        if self.ids.depth() != 0 {
            tracing::warn!(depth = self.ids.depth(), "identity stack not empty at frame start");
            self.ids = IdStack::new();
        }
    }

    /// Finish a tick: clear pointer edges and report a cursor change.
    pub(crate) fn end_frame(&mut self) -> Option<CursorIcon> {
        self.pointer.end_frame();
        if self.cursor != self.applied_cursor {
            self.applied_cursor = self.cursor;
            Some(self.cursor)
        } else {
            None
        }
    }

    pub(crate) fn pointer_mut(&mut self) -> &mut PointerState {
        &mut self.pointer
    }

    // ==================== Identity ====================

    pub fn push_id(&mut self, id: impl Into<IdPart>) {
        self.ids.push(id);
    }

    /// Pop `count` identity scopes.
    ///
    /// # Panics
    ///
    /// Panics on underflow. See [`ImContext::try_pop_id`].
    pub fn pop_id(&mut self, count: usize) {
        self.ids.pop(count);
    }

    pub fn try_pop_id(&mut self, count: usize) -> Result<(), ChartError> {
        self.ids.try_pop(count)
    }

    /// Run `f` with `id` pushed, popping it afterwards.
    pub fn with_id<R>(&mut self, id: impl Into<IdPart>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.ids.push(id);
        let result = f(self);
        self.ids.pop(1);
        result
    }

    pub fn id_depth(&self) -> usize {
        self.ids.depth()
    }

    /// Full path of `id` under the current scopes.
    pub fn path(&self, id: impl Into<IdPart>) -> WidgetPath {
        self.ids.path(id)
    }

    // ==================== State ====================

    pub fn get_state(&self, id: impl Into<IdPart>, default: f64) -> f64 {
        self.state.get_or(&self.ids.path(id), default)
    }

    pub fn set_state(&mut self, id: impl Into<IdPart>, value: f64) {
        let path = self.ids.path(id);
        self.state.set(path, value);
    }

    /// Forget the persisted value of `id`, returning it.
    pub fn remove_state(&mut self, id: impl Into<IdPart>) -> Option<f64> {
        let path = self.ids.path(id);
        self.state.remove(&path)
    }

    /// Forget every persisted value, e.g. when the chart's content changes.
    pub fn clear_state(&mut self) {
        self.state.clear();
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    // ==================== Active widget ====================

    pub fn set_active(&mut self, id: impl Into<IdPart>) {
        let path = self.ids.path(id);
        self.active.claim(path);
    }

    /// Release the active token if `id` (under the current scopes) holds it.
    pub fn unset_active(&mut self, id: impl Into<IdPart>) -> bool {
        let path = self.ids.path(id);
        self.active.release(&path)
    }

    pub fn is_active(&self, id: impl Into<IdPart>) -> bool {
        self.active.is(&self.ids.path(id))
    }

    pub fn active_widget(&self) -> Option<&WidgetPath> {
        self.active.current()
    }

    /// Standard drag protocol: claim on a pointer-down edge while `inside`,
    /// release on a pointer-up edge wherever the pointer is. Returns whether
    /// the widget is active afterwards.
    pub fn capture_drag(&mut self, id: impl Into<IdPart>, inside: bool) -> bool {
        let path = self.ids.path(id);
        if self.pointer.went_down() && inside {
            self.active.claim(path.clone());
        } else if self.pointer.went_up() {
            self.active.release(&path);
        }
        self.active.is(&path)
    }

    // ==================== Animation ====================

    /// Conditioned delta of the current tick.
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Step `from` toward `target` for this tick. Marks the chart as
    /// animating while the two are apart.
    pub fn move_toward(&mut self, from: f64, target: f64, speed: f64) -> f64 {
        if (target - from).abs() > SETTLED_EPSILON {
            self.animating = true;
        }
        easing::move_toward(from, target, speed, self.delta_ms)
    }

    /// Step the persisted value `id` toward `target` and store the result.
    /// A value seen for the first time starts at `target`.
    pub fn animate(&mut self, id: impl Into<IdPart>, target: f64, speed: f64) -> f64 {
        let path = self.ids.path(id);
        let current = self.state.get_or(&path, target);
        let next = self.move_toward(current, target, speed);
        self.state.set(path, next);
        next
    }

    /// Whether any animation asked for another frame this tick.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    // ==================== Pointer ====================

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn pointer_position(&self) -> Vec2 {
        self.pointer.position()
    }

    /// Whether the pointer is over the chart and inside `rect`.
    pub fn hovered(&self, rect: Rect) -> bool {
        self.pointer.is_over() && rect.contains(self.pointer.position())
    }

    /// Size of the chart area this tick.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    // ==================== Tooltip & cursor ====================

    /// Request a tooltip for this tick. The last request wins; `origin`
    /// defaults to the pointer position.
    pub fn show_tooltip(&mut self, text: impl Into<String>, origin: Option<Vec2>) {
        self.tooltip = Some(TooltipRequest {
            text: text.into(),
            origin: origin.unwrap_or_else(|| self.pointer.position()),
        });
    }

    pub fn tooltip(&self) -> Option<&TooltipRequest> {
        self.tooltip.as_ref()
    }

    pub(crate) fn take_tooltip(&mut self) -> Option<TooltipRequest> {
        self.tooltip.take()
    }

    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEvent;

    fn ctx_with_delta(delta_ms: f64) -> ImContext {
        let mut ctx = ImContext::new();
        ctx.begin_frame(delta_ms, Vec2::new(200.0, 100.0));
        ctx
    }

    fn move_pointer(ctx: &mut ImContext, position: Vec2, any_down: bool) {
        ctx.pointer_mut().on_event(PointerEvent::Moved { position, any_down });
    }

    // ==================== Identity & state ====================

    #[test]
    fn test_state_is_scoped_by_identity() {
        let mut ctx = ctx_with_delta(16.0);
        ctx.with_id(0usize, |ctx| ctx.set_state("v", 1.0));
        ctx.with_id(1usize, |ctx| ctx.set_state("v", 2.0));
        assert_eq!(ctx.with_id(0usize, |ctx| ctx.get_state("v", 0.0)), 1.0);
        assert_eq!(ctx.with_id(1usize, |ctx| ctx.get_state("v", 0.0)), 2.0);
        assert_eq!(ctx.id_depth(), 0);
    }

    #[test]
    fn test_remove_state() {
        let mut ctx = ImContext::new();
        ctx.set_state("v", 3.0);
        assert_eq!(ctx.remove_state("v"), Some(3.0));
        assert_eq!(ctx.get_state("v", -1.0), -1.0);
        ctx.set_state("w", 1.0);
        ctx.clear_state();
        assert!(ctx.state().is_empty());
    }

    #[test]
    fn test_try_pop_id_underflow() {
        let mut ctx = ImContext::new();
        assert!(ctx.try_pop_id(1).is_err());
    }

    #[test]
    fn test_unbalanced_ids_are_reset_at_frame_start() {
        let mut ctx = ImContext::new();
        ctx.push_id("leak");
        ctx.begin_frame(16.0, Vec2::ZERO);
        assert_eq!(ctx.id_depth(), 0);
    }

    // ==================== Active widget ====================

    #[test]
    fn test_active_is_scoped() {
        let mut ctx = ImContext::new();
        ctx.push_id("slider");
        ctx.set_active("volume");
        assert!(ctx.is_active("volume"));
        ctx.pop_id(1);
        assert!(!ctx.is_active("volume"));
        assert_eq!(ctx.active_widget().unwrap().to_string(), "slider.volume");
    }

    #[test]
    fn test_capture_drag_protocol() {
        let mut ctx = ImContext::new();
        move_pointer(&mut ctx, Vec2::new(5.0, 5.0), true);
        assert!(ctx.capture_drag("knob", true));
        ctx.end_frame();

        // Still held while dragging outside.
        move_pointer(&mut ctx, Vec2::new(500.0, 5.0), true);
        assert!(ctx.capture_drag("knob", false));
        ctx.end_frame();

        move_pointer(&mut ctx, Vec2::new(500.0, 5.0), false);
        assert!(!ctx.capture_drag("knob", false));
    }

    #[test]
    fn test_press_outside_does_not_capture() {
        let mut ctx = ImContext::new();
        ctx.pointer_mut().on_event(PointerEvent::Pressed);
        assert!(!ctx.capture_drag("knob", false));
    }

    // ==================== Animation ====================

    #[test]
    fn test_move_toward_marks_animating() {
        let mut ctx = ctx_with_delta(16.0);
        let value = ctx.move_toward(0.0, 10.0, 10.0);
        assert!((value - 1.6).abs() < 1e-9);
        assert!(ctx.is_animating());

        ctx.begin_frame(16.0, Vec2::ZERO);
        ctx.move_toward(10.0, 10.0, 10.0);
        assert!(!ctx.is_animating());
    }

    #[test]
    fn test_animate_starts_at_target() {
        let mut ctx = ctx_with_delta(16.0);
        assert_eq!(ctx.animate("d", 5.0, 10.0), 5.0);
        assert!(!ctx.is_animating());
        let next = ctx.animate("d", 15.0, 10.0);
        assert!((next - 6.6).abs() < 1e-9);
        assert_eq!(ctx.get_state("d", 0.0), next);
    }

    // ==================== Tooltip & cursor ====================

    #[test]
    fn test_tooltip_last_request_wins() {
        let mut ctx = ImContext::new();
        move_pointer(&mut ctx, Vec2::new(7.0, 8.0), false);
        ctx.show_tooltip("first", None);
        ctx.show_tooltip("second", Some(Vec2::new(1.0, 2.0)));
        let tooltip = ctx.take_tooltip().unwrap();
        assert_eq!(tooltip.text, "second");
        assert_eq!(tooltip.origin, Vec2::new(1.0, 2.0));
        assert!(ctx.tooltip().is_none());
    }

    #[test]
    fn test_tooltip_defaults_to_pointer() {
        let mut ctx = ImContext::new();
        move_pointer(&mut ctx, Vec2::new(7.0, 8.0), false);
        ctx.show_tooltip("hi", None);
        assert_eq!(ctx.tooltip().unwrap().origin, Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_cursor_change_reported_once() {
        let mut ctx = ctx_with_delta(16.0);
        ctx.set_cursor(CursorIcon::Grab);
        assert_eq!(ctx.end_frame(), Some(CursorIcon::Grab));

        ctx.begin_frame(16.0, Vec2::ZERO);
        ctx.set_cursor(CursorIcon::Grab);
        assert_eq!(ctx.end_frame(), None);

        ctx.begin_frame(16.0, Vec2::ZERO);
        assert_eq!(ctx.end_frame(), Some(CursorIcon::Default));
    }
}
