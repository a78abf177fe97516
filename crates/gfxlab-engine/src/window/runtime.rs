use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::AspectPolicy;
use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Title, size and aspect policy of the exercise window.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Whether drawing covers the whole window or its largest centered square.
    pub aspect: AspectPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gfxlab".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            aspect: AspectPolicy::Free,
        }
    }
}

impl RuntimeConfig {
    /// Square canvas of `side` logical pixels that stays square on resize.
    pub fn square(title: impl Into<String>, side: f64) -> Self {
        Self {
            title: title.into(),
            initial_size: LogicalSize::new(side, side),
            aspect: AspectPolicy::Square,
        }
    }
}

/// Requests an app can make of the runtime from inside a frame.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit: bool,
}

impl RuntimeCtx {
    /// Closes the window once the current frame has been presented.
    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs the frame loop until it closes.
    ///
    /// Errors raised while creating the window or the GPU context are
    /// returned after the event loop has shut down.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host { config, gpu_init, app, surface: None, fatal: None };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        host.fatal.map_or(Ok(()), Err)
    }
}

/// The window together with the GPU surface borrowing it and the
/// per-window input and timing state.
#[self_referencing]
struct Surface {
    input: InputState,
    frame_input: InputFrame,
    clock: FrameClock,
    aspect: AspectPolicy,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Surface {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_min_inner_size(LogicalSize::new(64.0, 64.0));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        SurfaceTryBuilder {
            input: InputState::default(),
            frame_input: InputFrame::default(),
            clock: FrameClock::default(),
            aspect: config.aspect,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize_to_window(&mut self) {
        let size = self.with_window(|w| w.inner_size());
        self.with_gpu_mut(|gpu| gpu.resize(size));
    }
}

struct Host<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    surface: Option<Surface>,
    fatal: Option<anyhow::Error>,
}

impl<A: App> Host<A> {
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        // The GPU surface must go before the event loop tears the window down.
        self.surface = None;
        event_loop.exit();
    }

    fn redraw(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let app = &mut self.app;
        let mut runtime = RuntimeCtx::default();

        let control = surface.with_mut(|f| {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: f.window },
                gpu: f.gpu,
                input: f.input,
                input_frame: f.frame_input,
                time: f.clock.tick(),
                aspect: *f.aspect,
                runtime: &mut runtime,
            };
            let control = app.on_frame(&mut ctx);

            // Edge-triggered input belongs to exactly one frame.
            f.frame_input.clear();
            control
        });

        control == AppControl::Exit || runtime.exit_requested()
    }
}

impl<A: App> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match Surface::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(surface) => {
                log::debug!("window {:?} opened", surface.id());
                surface.request_redraw();
                self.surface = Some(surface);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Every exercise animates, so redraw continuously.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(surface) = &self.surface {
            surface.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(surface) = self.surface.as_mut().filter(|s| s.id() == id) else {
            return;
        };

        surface.with_mut(|f| {
            if let Some(ev) = translate_window_event(f.window.scale_factor(), &event) {
                f.input.apply_event(f.frame_input, ev);
            }
        });

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shut_down(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                surface.resize_to_window();
                surface.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if self.redraw() {
                    self.shut_down(event_loop);
                }
            }
            _ => {}
        }
    }
}
