//! Arrow keys move a square one step per key-down event (auto-repeat included).

mod stepper;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{
    FlatRenderer, Program, ProgramDesc, RenderCtx, RenderTarget, ShaderSource, TextRenderer,
};
use gfxlab_engine::scene::DrawList;
use gfxlab_engine::text::TextOverlay;
use gfxlab_engine::window::{Runtime, RuntimeConfig};

use stepper::KeyStepper;

// (-0.1,-0.1) (-0.1,0.1) (0.1,0.1) (0.1,-0.1) as two triangles.
const SQUARE: [[f32; 3]; 6] = [
    [-0.1, -0.1, 0.0],
    [-0.1, 0.1, 0.0],
    [0.1, 0.1, 0.0],
    [-0.1, -0.1, 0.0],
    [0.1, 0.1, 0.0],
    [0.1, -0.1, 0.0],
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Params {
    d: [f32; 2],
    _pad: [f32; 2],
    color: [f32; 4],
}

struct KeyMove {
    stepper: KeyStepper,
    source: ShaderSource,
    program: Option<Program<Params>>,
    vbo: Option<wgpu::Buffer>,
    overlay: TextOverlay,
    flat: FlatRenderer,
    text: TextRenderer,
    list: DrawList,
}

impl KeyMove {
    fn draw_square(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if program_is_stale(self.program.as_ref().map(Program::surface_format), ctx.surface_format) {
            const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
            let layouts = [wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &ATTRS,
            }];
            self.program = Some(Program::new(ctx, &self.source, &ProgramDesc::new("hw03 square", &layouts)));
        }
        let vbo = self.vbo.get_or_insert_with(|| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("hw03 square vbo"),
                contents: bytemuck::cast_slice(&SQUARE),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        let Some(program) = self.program.as_mut() else { return };

        let d = self.stepper.offset().to_array();
        program.upload(ctx, &[Params { d, _pad: [0.0; 2], color: Color::RED.to_array() }]);

        let mut rpass = target.begin_load_pass("hw03 square pass");
        ctx.set_content_viewport(&mut rpass);
        if program.bind(&mut rpass, 0) {
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..SQUARE.len() as u32, 0..1);
        }
    }
}

impl App for KeyMove {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for key in ctx.input_frame.key_down_events() {
            self.stepper.key_down(key);
        }

        self.list.clear();
        self.overlay.push_line(&mut self.list, 1, "Use arrow keys to move the rectangle");

        ctx.render(Color::BLACK, |rctx, target| {
            self.draw_square(rctx, target);
            self.flat.render(rctx, target, &self.list);
            self.text.render(rctx, target, &self.list, self.overlay.fonts());
        })
    }
}

/// The square's pipeline is tied to the swapchain format it was built for.
fn program_is_stale(built_for: Option<wgpu::TextureFormat>, surface: wgpu::TextureFormat) -> bool {
    built_for != Some(surface)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let source = ShaderSource::embedded("hw03 move shader", include_str!("../shaders/move.wgsl"))
        .require_entry_points(&["vs_main", "fs_main"])?;
    log::info!("hw03: every arrow key-down, repeats included, moves the square");

    let app = KeyMove {
        stepper: KeyStepper::default(),
        source,
        program: None,
        vbo: None,
        overlay: TextOverlay::new(),
        flat: FlatRenderer::new(),
        text: TextRenderer::new(),
        list: DrawList::new(),
    };

    Runtime::run(RuntimeConfig::square("hw03 - key move", 600.0), GpuInit::display_space(), app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_rebuilds_when_surface_format_changes() {
        let srgb = wgpu::TextureFormat::Bgra8UnormSrgb;
        let linear = wgpu::TextureFormat::Bgra8Unorm;
        assert!(program_is_stale(None, linear));
        assert!(!program_is_stale(Some(linear), linear));
        assert!(program_is_stale(Some(srgb), linear));
    }
}
