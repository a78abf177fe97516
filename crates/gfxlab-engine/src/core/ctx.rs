use winit::window::Window;

use crate::coords::{content_rect, to_ndc, AspectPolicy, Rect, Vec2, Viewport};
use crate::device::Gpu;
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Read-only view of the window being drawn.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    /// Inner size in logical pixels.
    pub fn logical_size(&self) -> Viewport {
        let size = self.window.inner_size().to_logical::<f32>(self.window.scale_factor());
        Viewport::new(size.width, size.height)
    }
}

/// Everything an [`App`](super::App) gets to see during one frame.
///
/// `'a` spans the callback; `'w` is how long the window outlives its `Gpu`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    /// Held-state input (keys down, pointer position, buttons).
    pub input: &'a InputState,
    /// Edges and deltas collected since the previous frame.
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub aspect: AspectPolicy,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// The part of the window the exercise draws into, in logical pixels.
    pub fn content_rect(&self) -> Rect {
        content_rect(self.window.logical_size(), self.aspect)
    }

    /// Pointer in content-rect NDC (+Y up); `None` once it has left the window.
    pub fn pointer_ndc(&self) -> Option<Vec2> {
        self.input
            .pointer_pos
            .map(|(x, y)| to_ndc(self.content_rect(), Vec2::new(x, y)))
    }

    /// Runs one render pass sequence for this frame: clear to `clear`,
    /// let `draw` record into the target, then present.
    ///
    /// Skipped frames (minimized window, transient surface errors) return
    /// `Continue` without calling `draw`.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame(clear) {
            Ok(Some(frame)) => frame,
            Ok(None) => return AppControl::Continue,
            Err(err) => {
                log::error!("{err:#}");
                return AppControl::Exit;
            }
        };

        let size = self.gpu.size();
        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            self.content_rect(),
            self.window.scale_factor(),
            (size.width, size.height),
        );
        draw(&rctx, &mut RenderTarget::new(&mut frame.encoder, &frame.view, self.gpu.depth_view()));

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }
}
