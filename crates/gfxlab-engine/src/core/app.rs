use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Whether the runtime keeps going after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Implemented by each exercise binary and driven by [`crate::window::Runtime`].
pub trait App {
    /// Sees every raw window event after the input state has absorbed it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Updates state and draws one frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
