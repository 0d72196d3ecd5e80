//! Pointer edge detection
//!
//! Hosts poll "is the button down" every frame. The simulation wants one
//! click per press, so the press edge is extracted here.

use glam::Vec2;

use crate::sim::TickInput;

/// Raw device state sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct RawInput {
    /// Pointer position mapped into world coordinates
    pub pointer: Vec2,
    /// Primary button currently held
    pub primary_down: bool,
    /// Escape currently held
    pub escape_down: bool,
    /// The window was asked to close
    pub window_closed: bool,
}

/// Remembers the previous button sample to report press edges only
#[derive(Debug, Clone, Default)]
pub struct PointerEdge {
    was_down: bool,
}

impl PointerEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's button sample; yields `pos` only on the press edge
    pub fn sample(&mut self, down: bool, pos: Vec2) -> Option<Vec2> {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed.then_some(pos)
    }

    /// Forget the held state (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.was_down = false;
    }

    /// Build the simulation input for this frame
    pub fn tick_input(&mut self, raw: &RawInput) -> TickInput {
        TickInput {
            click: self.sample(raw.primary_down, raw.pointer),
            close_requested: raw.window_closed || raw.escape_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_button_clicks_once() {
        let mut edge = PointerEdge::new();
        let pos = Vec2::new(120.0, 80.0);

        assert_eq!(edge.sample(true, pos), Some(pos));
        assert_eq!(edge.sample(true, pos), None);
        assert_eq!(edge.sample(true, pos), None);
        assert_eq!(edge.sample(false, pos), None);
        assert_eq!(edge.sample(true, Vec2::ZERO), Some(Vec2::ZERO));
    }

    #[test]
    fn test_reset_rearms() {
        let mut edge = PointerEdge::new();
        edge.sample(true, Vec2::ZERO);
        edge.reset();
        assert!(edge.sample(true, Vec2::ZERO).is_some());
    }

    #[test]
    fn test_tick_input() {
        let mut edge = PointerEdge::new();
        let raw = RawInput {
            pointer: Vec2::new(5.0, 6.0),
            primary_down: true,
            ..Default::default()
        };

        let input = edge.tick_input(&raw);
        assert_eq!(input.click, Some(Vec2::new(5.0, 6.0)));
        assert!(!input.close_requested);

        let input = edge.tick_input(&RawInput {
            escape_down: true,
            ..raw
        });
        assert_eq!(input.click, None);
        assert!(input.close_requested);

        let input = edge.tick_input(&RawInput {
            window_closed: true,
            ..Default::default()
        });
        assert!(input.close_requested);
    }
}
