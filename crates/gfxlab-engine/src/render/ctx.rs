use crate::coords::{Rect, Viewport};

/// Renderer-facing context for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Content size in logical px.
    pub viewport: Viewport,
    /// Content rect inside the window, logical px.
    pub content: Rect,
    pub scale_factor: f32,
    /// Surface size in physical px.
    pub surface_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        content: Rect,
        scale_factor: f32,
        surface_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport: Viewport::new(content.size.x, content.size.y),
            content,
            scale_factor,
            surface_size,
        }
    }

    /// Content rect in physical pixels, clamped to the surface.
    pub fn content_physical(&self) -> (f32, f32, f32, f32) {
        let (sw, sh) = (self.surface_size.0 as f32, self.surface_size.1 as f32);
        let s = self.scale_factor;
        let x = (self.content.origin.x * s).clamp(0.0, sw);
        let y = (self.content.origin.y * s).clamp(0.0, sh);
        let w = (self.content.size.x * s).min(sw - x).max(1.0);
        let h = (self.content.size.y * s).min(sh - y).max(1.0);
        (x, y, w, h)
    }

    /// Restricts rasterization to the content rect so NDC spans exactly it.
    pub fn set_content_viewport(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let (x, y, w, h) = self.content_physical();
        rpass.set_viewport(x, y, w, h, 0.0, 1.0);
    }

    /// Scissor for a content-local clip rect; `None` when nothing would be drawn.
    pub fn clip_to_scissor(&self, clip: Option<Rect>) -> Option<(u32, u32, u32, u32)> {
        logical_clip_to_scissor(clip, self.content, self.scale_factor, self.surface_size)
    }
}

/// Converts a content-local logical clip rect to a physical scissor rect.
///
/// `clip = None` means the whole content rect. The result is clamped to both
/// the content rect and the surface; zero-area results return `None`.
pub fn logical_clip_to_scissor(
    clip: Option<Rect>,
    content: Rect,
    scale: f32,
    surface_size: (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    let local = clip.unwrap_or(Rect::new(0.0, 0.0, content.size.x, content.size.y));
    let window_rect = local
        .translated(content.origin)
        .intersect(content)?;

    let (sw, sh) = surface_size;
    let x0 = ((window_rect.origin.x * scale).round().max(0.0) as u32).min(sw);
    let y0 = ((window_rect.origin.y * scale).round().max(0.0) as u32).min(sh);
    let x1 = ((window_rect.max().x * scale).round().max(0.0) as u32).min(sw);
    let y1 = ((window_rect.max().y * scale).round().max(0.0) as u32).min(sh);

    let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
    if w == 0 || h == 0 { None } else { Some((x0, y0, w, h)) }
}

/// Target for drawing (encoder + color view + depth view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        depth_view: &'a wgpu::TextureView,
    ) -> Self {
        Self { encoder, color_view, depth_view }
    }

    /// Begins a pass that keeps existing color and depth contents.
    pub fn begin_load_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
