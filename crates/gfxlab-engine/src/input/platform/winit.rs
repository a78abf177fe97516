use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, Modifiers, MouseButton};

/// Logical pixels per wheel notch, the factor browsers apply to line deltas.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Translates the input-related subset of `WindowEvent`; `None` for the rest.
pub fn translate_window_event(scale_factor: f64, event: &WindowEvent) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: match event.physical_key {
                PhysicalKey::Code(code) => map_key(code),
                PhysicalKey::Unidentified(_) => Key::Unknown(0),
            },
            pressed: event.state == ElementState::Pressed,
            repeat: event.repeat,
        },
        WindowEvent::CursorMoved { position, .. } => {
            let p = position.to_logical::<f32>(scale_factor);
            InputEvent::PointerMoved { x: p.x, y: p.y }
        }
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::MouseInput { state, button, .. } => InputEvent::Button {
            button: map_button(*button),
            pressed: *state == ElementState::Pressed,
        },
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = wheel_pixels(*delta, scale_factor);
            InputEvent::Wheel { dx, dy }
        }
        WindowEvent::ModifiersChanged(m) => {
            let m = m.state();
            InputEvent::Modifiers(Modifiers {
                shift: m.shift_key(),
                ctrl: m.control_key(),
                alt: m.alt_key(),
                meta: m.super_key(),
            })
        }
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        _ => return None,
    };
    Some(ev)
}

/// winit reports scrolling up as positive; flip to the browser sign.
fn wheel_pixels(delta: MouseScrollDelta, scale_factor: f64) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (-x * PIXELS_PER_LINE, -y * PIXELS_PER_LINE),
        MouseScrollDelta::PixelDelta(p) => {
            let p = p.to_logical::<f32>(scale_factor);
            (-p.x, -p.y)
        }
    }
}

fn map_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(n) => MouseButton::Other(n),
    }
}

macro_rules! key_table {
    ($code:expr; $($from:ident $(| $alt:ident)* => $to:ident),* $(,)?) => {
        match $code {
            $(KeyCode::$from $(| KeyCode::$alt)* => Key::$to,)*
            other => Key::Unknown(other as u32),
        }
    };
}

fn map_key(code: KeyCode) -> Key {
    key_table! { code;
        Escape => Escape, Enter | NumpadEnter => Enter, Tab => Tab, Space => Space,
        Minus | NumpadSubtract => Minus, Equal | NumpadAdd => Equal,
        ArrowUp => ArrowUp, ArrowDown => ArrowDown, ArrowLeft => ArrowLeft, ArrowRight => ArrowRight,
        KeyA => A, KeyB => B, KeyC => C, KeyD => D, KeyE => E, KeyF => F, KeyG => G,
        KeyH => H, KeyI => I, KeyJ => J, KeyK => K, KeyL => L, KeyM => M, KeyN => N,
        KeyO => O, KeyP => P, KeyQ => Q, KeyR => R, KeyS => S, KeyT => T, KeyU => U,
        KeyV => V, KeyW => W, KeyX => X, KeyY => Y, KeyZ => Z,
        Digit0 | Numpad0 => Digit0, Digit1 | Numpad1 => Digit1, Digit2 | Numpad2 => Digit2,
        Digit3 | Numpad3 => Digit3, Digit4 | Numpad4 => Digit4, Digit5 | Numpad5 => Digit5,
        Digit6 | Numpad6 => Digit6, Digit7 | Numpad7 => Digit7, Digit8 | Numpad8 => Digit8,
        Digit9 | Numpad9 => Digit9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn keypad_digits_alias_the_top_row() {
        assert_eq!(map_key(KeyCode::Numpad3), Key::Digit3);
        assert_eq!(map_key(KeyCode::Digit3), Key::Digit3);
        assert_eq!(map_key(KeyCode::KeyC), Key::C);
    }

    #[test]
    fn unbound_keys_are_unknown() {
        assert!(matches!(map_key(KeyCode::F5), Key::Unknown(_)));
    }

    #[test]
    fn one_notch_down_is_one_hundred_pixels() {
        assert_eq!(wheel_pixels(MouseScrollDelta::LineDelta(0.0, -1.0), 1.0), (0.0, 100.0));
    }

    #[test]
    fn pixel_wheel_is_scaled_to_logical() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0));
        assert_eq!(wheel_pixels(delta, 2.0), (0.0, -20.0));
    }
}
