use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use gfxlab_engine::coords::Vec2;
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{Program, ProgramDesc, RenderCtx, RenderTarget, ShaderSource};

/// Corners of the 0.2 x 0.2 square, in fan order.
pub const SQUARE_FAN: [[f32; 3]; 4] = [
    [-0.1, -0.1, 0.0],
    [-0.1, 0.1, 0.0],
    [0.1, 0.1, 0.0],
    [0.1, -0.1, 0.0],
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MoveUniform {
    d: [f32; 2],
    _pad: [f32; 2],
    color: [f32; 4],
}

/// The square drawn through the exercise's own shader program.
pub struct MovingSquare {
    source: ShaderSource,
    program: Option<Program<MoveUniform>>,
    vbo: Option<wgpu::Buffer>,
}

impl MovingSquare {
    pub fn new(source: ShaderSource) -> Self {
        Self { source, program: None, vbo: None }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, offset: Vec2, color: Color) {
        if self.program.as_ref().is_none_or(|p| p.surface_format() != ctx.surface_format) {
            let layouts = [vertex_layout()];
            let desc = ProgramDesc::new("hw02 square", &layouts);
            self.program = Some(Program::new(ctx, &self.source, &desc));
        }
        let vbo = self.vbo.get_or_insert_with(|| {
            let vertices = fan_to_triangles(&SQUARE_FAN);
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("hw02 square vbo"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        let Some(program) = self.program.as_mut() else { return };

        program.upload(ctx, &[MoveUniform { d: offset.to_array(), _pad: [0.0; 2], color: color.to_array() }]);

        let mut rpass = target.begin_load_pass("hw02 square pass");
        ctx.set_content_viewport(&mut rpass);
        if program.bind(&mut rpass, 0) {
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..6, 0..1);
        }
    }
}

/// WebGPU has no fan topology; expand to a triangle list.
fn fan_to_triangles(fan: &[[f32; 3]; 4]) -> [[f32; 3]; 6] {
    [fan[0], fan[1], fan[2], fan[0], fan[2], fan[3]]
}

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}
