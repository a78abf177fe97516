/// Keys the exercises bind. Everything else is `Unknown` with the
/// platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Minus,
    Equal,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Unknown(u32),
}

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// `Some(n)` for the digit keys, top row or keypad.
    pub fn digit(self) -> Option<u8> {
        DIGITS.iter().position(|&d| d == self).map(|n| n as u8)
    }

    pub fn is_arrow(self) -> bool {
        matches!(self, Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Window-system input after translation, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        pressed: bool,
        /// OS auto-repeat of a key that is already down.
        repeat: bool,
    },
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    Button { button: MouseButton, pressed: bool },
    /// Scroll distance with +Y meaning "scrolled down", as browsers report it.
    Wheel { dx: f32, dy: f32 },
    Modifiers(Modifiers),
    Focused(bool),
}

impl InputEvent {
    pub fn key_press(key: Key) -> Self {
        Self::Key { key, pressed: true, repeat: false }
    }

    pub fn key_release(key: Key) -> Self {
        Self::Key { key, pressed: false, repeat: false }
    }
}
