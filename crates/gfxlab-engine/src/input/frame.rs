use std::collections::HashSet;

use glam::Vec2;

use super::types::{InputEvent, Key, MouseButton};

/// What happened since the previous frame.
///
/// Cleared by the runtime after every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Every translated event in arrival order, auto-repeats included.
    pub events: Vec<InputEvent>,
    /// Keys that went down this frame. Auto-repeats do not count.
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
    /// Summed wheel movement in logical pixels, +Y scrolling down.
    pub scroll_delta: Vec2,
}

impl InputFrame {
    /// Empties every set, keeping allocations.
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll_delta = Vec2::ZERO;
    }

    /// Keys that produced a key-down this frame, repeats included, in order.
    pub fn key_down_events(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(|ev| match *ev {
            InputEvent::Key { key, pressed: true, .. } => Some(key),
            _ => None,
        })
    }
}
