use anyhow::{bail, Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::paint::Color;

use super::surface::{choose_alpha_mode, choose_surface_format, create_depth_view};
use super::DEPTH_FORMAT;

/// How the GPU context should be set up for a window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Ask for an sRGB swapchain. Off for exercises that author colors in
    /// display space, the way a WebGL canvas presents them.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    pub power_preference: wgpu::PowerPreference,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

impl GpuInit {
    /// Non-sRGB swapchain; color values reach the screen unconverted.
    pub fn display_space() -> Self {
        Self { prefer_srgb: false, ..Self::default() }
    }
}

/// Device, queue and the configured surface of one window, plus a depth
/// buffer kept at the surface size.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    size: PhysicalSize<u32>,
}

/// An acquired swapchain image with the encoder recording into it.
///
/// Color and depth are already cleared when the frame is handed out.
pub struct GpuFrame {
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
    texture: wgpu::SurfaceTexture,
}

/// What to do after the surface refused to hand out an image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; try next frame.
    Reconfigured,
    SkipFrame,
    Fatal,
}

impl SurfaceErrorAction {
    fn classify(err: &SurfaceError) -> Self {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => Self::Reconfigured,
            SurfaceError::OutOfMemory => Self::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => Self::SkipFrame,
        }
    }
}

async fn open_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
    power_preference: wgpu::PowerPreference,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .context("no GPU adapter can present to this window")?;

    let info = adapter.get_info();
    log::info!("adapter: {} ({:?})", info.name, info.backend);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("gfxlab device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to open the GPU device")?;

    Ok((adapter, device, queue))
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            bail!("window has zero size");
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;
        let (adapter, device, queue) = open_device(&instance, &surface, init.power_preference).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps, init.prefer_srgb)
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: choose_alpha_mode(&caps),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::debug!("surface {format:?} at {}x{}", size.width, size.height);

        let depth_view = create_depth_view(&device, DEPTH_FORMAT, size);
        Ok(Self { surface, device, queue, config, depth_view, size })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Drawable size in physical pixels; zero while minimized.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    fn is_drawable(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    /// Follows the window size. A zero size is remembered but the surface
    /// keeps its last configuration until the window comes back.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
        if !self.is_drawable() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, DEPTH_FORMAT, size);
    }

    /// Acquires the next image and clears it to `clear` and the depth
    /// buffer to 1.0.
    ///
    /// `Ok(None)` means no frame this time (minimized, or a recoverable
    /// surface error). Unrecoverable surface errors are returned.
    pub fn begin_frame(&mut self, clear: Color) -> Result<Option<GpuFrame>> {
        if !self.is_drawable() {
            return Ok(None);
        }

        let texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => return self.recover(err).map(|()| None),
        };
        let view = texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("gfxlab frame"),
        });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gfxlab clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        Ok(Some(GpuFrame { view, encoder, texture }))
    }

    /// Submits everything recorded into `frame` and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { view, encoder, texture } = frame;
        self.queue.submit([encoder.finish()]);
        drop(view);
        texture.present();
    }

    fn recover(&mut self, err: SurfaceError) -> Result<()> {
        match SurfaceErrorAction::classify(&err) {
            SurfaceErrorAction::Reconfigured => {
                log::debug!("surface {err:?}; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(())
            }
            SurfaceErrorAction::SkipFrame => {
                log::warn!("surface acquire failed ({err:?}); skipping frame");
                Ok(())
            }
            SurfaceErrorAction::Fatal => bail!("surface error: {err}"),
        }
    }
}
