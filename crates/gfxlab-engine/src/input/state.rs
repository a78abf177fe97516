use std::collections::HashSet;

use glam::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, Modifiers, MouseButton};

/// Held keys and buttons plus the pointer position of one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical window pixels; `None` while the pointer is outside.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state and records its edges in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, pressed: true, .. } => {
                if self.keys_down.insert(key) {
                    frame.keys_pressed.insert(key);
                }
            }
            InputEvent::Key { key, pressed: false, .. } => {
                if self.keys_down.remove(&key) {
                    frame.keys_released.insert(key);
                }
            }
            InputEvent::Button { button, pressed: true } => {
                if self.buttons_down.insert(button) {
                    frame.buttons_pressed.insert(button);
                }
            }
            InputEvent::Button { button, pressed: false } => {
                if self.buttons_down.remove(&button) {
                    frame.buttons_released.insert(button);
                }
            }
            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Wheel { dx, dy } => frame.scroll_delta += Vec2::new(dx, dy),
            InputEvent::Modifiers(m) => self.modifiers = m,
            InputEvent::Focused(focused) => {
                self.focused = focused;
                // No release events arrive while unfocused.
                if !focused {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
        }
        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}
