//! Keyboard and touch input, reduced to arena-space intents

use crate::sim::TickInput;

/// Map a client-space x coordinate onto the arena
#[inline]
pub fn client_to_arena_x(client_x: f32, rect_left: f32, rect_width: f32, arena_width: f32) -> f32 {
    if rect_width <= 0.0 {
        return 0.0;
    }
    (client_x - rect_left) * arena_width / rect_width
}

/// Held state of the two direction keys
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    left: bool,
    right: bool,
}

impl HeldKeys {
    /// Record a keydown/keyup. Returns false for keys the game ignores.
    pub fn set(&mut self, key: &str, down: bool) -> bool {
        match key {
            "ArrowLeft" => self.left = down,
            "ArrowRight" => self.right = down,
            _ => return false,
        }
        true
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}

/// Turns a stream of touch positions into horizontal deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    last_x: Option<f32>,
}

impl DragTracker {
    pub fn begin(&mut self, arena_x: f32) {
        self.last_x = Some(arena_x);
    }

    /// Delta since the previous position, or None without an active touch
    pub fn move_to(&mut self, arena_x: f32) -> Option<f32> {
        let last = self.last_x?;
        self.last_x = Some(arena_x);
        Some(arena_x - last)
    }

    pub fn end(&mut self) {
        self.last_x = None;
    }

    pub fn is_active(&self) -> bool {
        self.last_x.is_some()
    }
}
