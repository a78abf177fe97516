//! Keyboard and pointer input.
//!
//! Engine types only; `platform::winit` does the translation from window
//! events. `InputState` holds what is down, `InputFrame` what changed.

mod frame;
mod state;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use platform::winit::PIXELS_PER_LINE;
pub use state::InputState;
pub use types::{InputEvent, Key, Modifiers, MouseButton};
