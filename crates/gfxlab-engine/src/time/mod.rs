//! Frame timing: a clock per window and an FPS counter for overlays.

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
