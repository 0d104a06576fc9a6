//! Pointer state sampled once per tick.

use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Button transitions since the last tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerEdges: u8 {
        const WENT_DOWN = 1 << 0;
        const WENT_UP = 1 << 1;
    }
}

/// Pointer input delivered by the host, in chart-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved. `any_down` is the current button state; hosts that
    /// stop delivering button events outside the surface still get drags
    /// released through it.
    Moved { position: Vec2, any_down: bool },
    /// The pointer entered the chart area.
    Entered,
    /// The pointer left the chart area.
    Left,
    Pressed,
    Released,
}

/// Pointer snapshot used by every hit test in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    position: Vec2,
    over: bool,
    down: bool,
    edges: PointerEdges,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one host event. Returns whether anything changed.
    pub fn on_event(&mut self, event: PointerEvent) -> bool {
        let before = *self;
        match event {
            PointerEvent::Moved { position, any_down } => {
                self.position = position;
                self.set_down(any_down);
            }
            PointerEvent::Entered => self.over = true,
            PointerEvent::Left => self.over = false,
            PointerEvent::Pressed => {
                self.down = true;
                self.edges |= PointerEdges::WENT_DOWN;
            }
            PointerEvent::Released => {
                self.down = false;
                self.edges |= PointerEdges::WENT_UP;
            }
        }
        *self != before
    }

    fn set_down(&mut self, down: bool) {
        if down != self.down {
            self.edges |= if down {
                PointerEdges::WENT_DOWN
            } else {
                PointerEdges::WENT_UP
            };
            self.down = down;
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the pointer is over the chart area.
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn edges(&self) -> PointerEdges {
        self.edges
    }

    pub fn went_down(&self) -> bool {
        self.edges.contains(PointerEdges::WENT_DOWN)
    }

    pub fn went_up(&self) -> bool {
        self.edges.contains(PointerEdges::WENT_UP)
    }

    /// Forget this tick's edges.
    pub fn end_frame(&mut self) {
        self.edges = PointerEdges::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_edges() {
        let mut pointer = PointerState::new();
        pointer.on_event(PointerEvent::Pressed);
        assert!(pointer.went_down());
        assert!(pointer.is_down());
        pointer.end_frame();
        assert!(!pointer.went_down());

        pointer.on_event(PointerEvent::Released);
        assert!(pointer.went_up());
        assert!(!pointer.is_down());
    }

    #[test]
    fn test_move_synthesises_missed_release() {
        let mut pointer = PointerState::new();
        pointer.on_event(PointerEvent::Pressed);
        pointer.end_frame();

        pointer.on_event(PointerEvent::Moved {
            position: Vec2::new(3.0, 4.0),
            any_down: false,
        });
        assert!(pointer.went_up());
        assert_eq!(pointer.position(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_enter_leave() {
        let mut pointer = PointerState::new();
        assert!(pointer.on_event(PointerEvent::Entered));
        assert!(pointer.is_over());
        assert!(!pointer.on_event(PointerEvent::Entered));
        pointer.on_event(PointerEvent::Left);
        assert!(!pointer.is_over());
    }
}
