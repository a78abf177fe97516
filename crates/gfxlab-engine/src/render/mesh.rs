use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::geometry::MeshData;
use crate::paint::Color;

use super::program::{DepthMode, Program, ProgramDesc};
use super::shader::ShaderSource;
use super::texture::GpuTexture;
use super::{RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshVertex {
    pos: [f32; 3],
    normal: [f32; 3],
    color: [f32; 4],
    uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x3, // normal
        2 => Float32x4, // color
        3 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn interleave(data: &MeshData) -> Vec<MeshVertex> {
    (0..data.vertex_count())
        .map(|i| MeshVertex {
            pos: data.positions[i].to_array(),
            normal: data.normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
            color: data.colors.get(i).copied().unwrap_or([1.0; 4]),
            uv: data.uvs.get(i).copied().unwrap_or_default().to_array(),
        })
        .collect()
}

/// Mesh uploaded to vertex + index buffers.
pub struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Uploads `data`. Missing per-vertex attributes fall back to up-facing
    /// normals, white and (0, 0); call `MeshData::validate` first to reject
    /// malformed meshes instead.
    pub fn upload(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&interleave(data)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo, index_count: data.indices.len() as u32 }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Per-draw uniform block of the mesh shader (352 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
    pub camera_pos: [f32; 4],
    /// x: lit, y: roughness, z: metalness, w: textured.
    pub material: [f32; 4],
}

/// Ambient + one directional light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lighting {
    /// Direction from the scene towards the light (need not be normalized).
    pub direction: Vec3,
    pub color: Color,
    pub ambient: Color,
}

impl MeshUniform {
    /// Unlit, untextured, white base color.
    pub fn new(model: Mat4, view: Mat4, proj: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
            base_color: [1.0; 4],
            light_dir: [0.0, 1.0, 0.0, 0.0],
            light_color: [1.0; 4],
            ambient: [0.0, 0.0, 0.0, 1.0],
            camera_pos: [0.0, 0.0, 0.0, 1.0],
            material: [0.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color.to_array();
        self
    }

    /// Multiplies the vertex color by the bound texture.
    pub fn textured(mut self, on: bool) -> Self {
        self.material[3] = if on { 1.0 } else { 0.0 };
        self
    }

    /// Switches to lit shading with a roughness/metalness material.
    pub fn lit(mut self, lighting: &Lighting, camera: Vec3, roughness: f32, metalness: f32) -> Self {
        let dir = lighting.direction.normalize_or(Vec3::Y);
        self.light_dir = dir.extend(0.0).to_array();
        self.light_color = lighting.color.to_array();
        self.ambient = lighting.ambient.to_array();
        self.camera_pos = camera.extend(1.0).to_array();
        self.material[0] = 1.0;
        self.material[1] = roughness;
        self.material[2] = metalness;
        self
    }
}

/// Inverse-transpose of `model`; identity for singular matrices.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() <= f32::EPSILON {
        Mat4::IDENTITY
    } else {
        model.inverse().transpose()
    }
}

/// One mesh draw: geometry, optional texture, uniforms.
pub struct MeshDraw<'a> {
    pub mesh: &'a GpuMesh,
    pub texture: Option<&'a GpuTexture>,
    pub uniform: MeshUniform,
}

/// Renderer for indexed meshes, depth-tested, both faces visible.
///
/// Draws without a texture sample a 1x1 white texture. Texture bind groups
/// are cached per `GpuTexture::id`.
#[derive(Default)]
pub struct MeshRenderer {
    program: Option<Program<MeshUniform>>,
    white: Option<GpuTexture>,
    texture_groups: HashMap<u64, wgpu::BindGroup>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draws: &[MeshDraw<'_>],
    ) {
        if draws.is_empty() {
            return;
        }

        self.ensure_program(ctx);
        if self.white.is_none() {
            self.white = Some(GpuTexture::white(ctx.device, ctx.queue));
        }

        let uniforms: Vec<MeshUniform> = draws.iter().map(|d| d.uniform).collect();
        let Some(program) = self.program.as_mut() else { return };
        program.upload(ctx, &uniforms);

        let Some(white) = self.white.as_ref() else { return };
        for texture in draws.iter().map(|d| d.texture.unwrap_or(white)) {
            if self.texture_groups.contains_key(&texture.id()) {
                continue;
            }
            if let Some(group) = program.texture_bind_group(ctx.device, texture) {
                self.texture_groups.insert(texture.id(), group);
            }
        }

        let mut rpass = target.begin_load_pass("gfxlab mesh pass");
        ctx.set_content_viewport(&mut rpass);
        if let Some((sx, sy, sw, sh)) = ctx.clip_to_scissor(None) {
            rpass.set_scissor_rect(sx, sy, sw, sh);
        }

        for (slot, draw) in draws.iter().enumerate() {
            let texture = draw.texture.unwrap_or(white);
            let Some(group) = self.texture_groups.get(&texture.id()) else { continue };
            if !program.bind(&mut rpass, slot) {
                return;
            }
            rpass.set_bind_group(1, group, &[]);
            rpass.set_vertex_buffer(0, draw.mesh.vbo.slice(..));
            rpass.set_index_buffer(draw.mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_program(&mut self, ctx: &RenderCtx<'_>) {
        if self.program.as_ref().is_some_and(|p| p.surface_format() == ctx.surface_format) {
            return;
        }

        let source = ShaderSource::embedded("gfxlab mesh shader", include_str!("shaders/mesh.wgsl"));
        let layouts = [MeshVertex::layout()];
        let desc = ProgramDesc {
            depth: DepthMode::TestAndWrite,
            textured: true,
            blend: Some(wgpu::BlendState::REPLACE),
            ..ProgramDesc::new("gfxlab mesh", &layouts)
        };
        self.program = Some(Program::new(ctx, &source, &desc));
        // Bind groups belong to the old program's layout.
        self.texture_groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    // ── uniform ───────────────────────────────────────────────────────────

    #[test]
    fn uniform_block_size_matches_shader() {
        assert_eq!(std::mem::size_of::<MeshUniform>(), 352);
    }

    #[test]
    fn new_uniform_is_unlit_and_untextured() {
        let u = MeshUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(u.material[0], 0.0);
        assert_eq!(u.material[3], 0.0);
        assert_eq!(u.textured(true).material[3], 1.0);
    }

    #[test]
    fn lit_normalizes_light_direction() {
        let lighting = Lighting {
            direction: Vec3::new(5.0, 12.0, 8.0),
            color: Color::WHITE,
            ambient: Color::from_hex_rgb(0x333333),
        };
        let u = MeshUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
            .lit(&lighting, Vec3::new(0.0, 50.0, 150.0), 0.8, 0.2);

        let dir = Vec3::new(u.light_dir[0], u.light_dir[1], u.light_dir[2]);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(u.material, [1.0, 0.8, 0.2, 0.0]);
        assert_eq!(u.camera_pos, [0.0, 50.0, 150.0, 1.0]);
        assert!((u.ambient[0] - 0.2).abs() < 1e-6);
    }

    // ── normal matrix ─────────────────────────────────────────────────────

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(model).transform_vector3(Vec3::X);
        assert!((n - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn singular_model_uses_identity() {
        assert_eq!(normal_matrix(Mat4::from_scale(Vec3::ZERO)), Mat4::IDENTITY);
    }

    // ── vertices ──────────────────────────────────────────────────────────

    #[test]
    fn interleave_fills_missing_attributes() {
        let data = MeshData {
            positions: vec![Vec3::X, Vec3::Y],
            uvs: vec![Vec2::new(0.25, 0.75)],
            ..MeshData::default()
        };
        let v = interleave(&data);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].uv, [0.25, 0.75]);
        assert_eq!(v[1].uv, [0.0, 0.0]);
        assert_eq!(v[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(v[1].color, [1.0; 4]);
    }
}
