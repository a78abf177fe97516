use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::coords::{Rect, Viewport};
use crate::scene::{DrawCmd, DrawList, FlatVertex, Topology};

use super::program::{DepthMode, Program, ProgramDesc};
use super::shader::ShaderSource;
use super::{RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FlatUniform {
    transform: [[f32; 4]; 4],
}

/// Renderer for `DrawCmd::Shape`.
///
/// All shapes of a frame share one vertex buffer; each draw item gets its own
/// transform slot and scissor. Point shapes are expanded on the CPU into
/// screen-aligned squares after their transform is applied.
#[derive(Default)]
pub struct FlatRenderer {
    depth: DepthMode,

    triangles: Option<Program<FlatUniform>>,
    lines: Option<Program<FlatUniform>>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Batch {
    first: u32,
    count: u32,
    lines: bool,
    clip: Option<Rect>,
}

impl FlatRenderer {
    /// 2D renderer: shapes ignore the depth buffer and paint in list order.
    pub fn new() -> Self {
        Self::default()
    }

    /// 3D helper renderer (axes, guides): depth-tested against the scene.
    pub fn with_depth_test() -> Self {
        Self { depth: DepthMode::TestAndWrite, ..Self::default() }
    }

    /// Renders every shape in `draw_list` in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        let (vertices, batches, uniforms) = build_batches(draw_list, ctx.viewport);
        if batches.is_empty() {
            return;
        }

        self.ensure_programs(ctx);
        self.ensure_vertex_capacity(ctx, vertices.len());

        let (Some(triangles), Some(lines)) = (self.triangles.as_mut(), self.lines.as_mut()) else {
            return;
        };
        triangles.upload(ctx, &uniforms);
        lines.upload(ctx, &uniforms);

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        let (Some(triangles), Some(lines)) = (self.triangles.as_ref(), self.lines.as_ref()) else {
            return;
        };

        let mut rpass = target.begin_load_pass("gfxlab flat pass");
        ctx.set_content_viewport(&mut rpass);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for (slot, batch) in batches.iter().enumerate() {
            let Some((sx, sy, sw, sh)) = ctx.clip_to_scissor(batch.clip) else { continue };
            rpass.set_scissor_rect(sx, sy, sw, sh);

            let program = if batch.lines { lines } else { triangles };
            if program.bind(&mut rpass, slot) {
                rpass.draw(batch.first..batch.first + batch.count, 0..1);
            }
        }
    }

    fn ensure_programs(&mut self, ctx: &RenderCtx<'_>) {
        let stale = |p: &Option<Program<FlatUniform>>| {
            p.as_ref().is_none_or(|p| p.surface_format() != ctx.surface_format)
        };
        if !stale(&self.triangles) && !stale(&self.lines) {
            return;
        }

        let source = ShaderSource::embedded("gfxlab flat shader", include_str!("shaders/flat.wgsl"));
        let layouts = [flat_vertex_layout()];

        let mut desc = ProgramDesc::new("gfxlab flat triangles", &layouts);
        desc.depth = self.depth;
        self.triangles = Some(Program::new(ctx, &source, &desc));

        desc.label = "gfxlab flat lines";
        desc.topology = wgpu::PrimitiveTopology::LineList;
        self.lines = Some(Program::new(ctx, &source, &desc));
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gfxlab flat vbo"),
            size: (new_cap * std::mem::size_of::<FlatVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

fn flat_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x4  // color
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<FlatVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

/// Flattens shapes into one vertex stream, one batch + uniform per item.
fn build_batches(
    draw_list: &DrawList,
    viewport: Viewport,
) -> (Vec<FlatVertex>, Vec<Batch>, Vec<FlatUniform>) {
    let mut vertices = Vec::new();
    let mut batches = Vec::new();
    let mut uniforms = Vec::new();

    for item in draw_list.iter_in_paint_order() {
        let DrawCmd::Shape(shape) = &item.cmd else { continue };

        let first = vertices.len() as u32;
        let (lines, transform) = match shape.topology {
            Topology::Triangles => {
                vertices.extend_from_slice(&shape.vertices);
                (false, shape.transform)
            }
            Topology::Lines => {
                vertices.extend_from_slice(&shape.vertices);
                (true, shape.transform)
            }
            Topology::Points { size } => {
                let half = point_half_extent(size, viewport);
                vertices.extend(expand_points(&shape.vertices, shape.transform, half));
                (false, Mat4::IDENTITY)
            }
        };

        let count = vertices.len() as u32 - first;
        if count == 0 {
            continue;
        }
        batches.push(Batch { first, count, lines, clip: item.clip_rect });
        uniforms.push(FlatUniform { transform: transform.to_cols_array_2d() });
    }

    (vertices, batches, uniforms)
}

/// Half size in NDC of a square `size` logical px wide.
fn point_half_extent(size: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(size / viewport.width.max(1.0), size / viewport.height.max(1.0))
}

fn expand_points(points: &[FlatVertex], transform: Mat4, half: Vec2) -> Vec<FlatVertex> {
    let mut out = Vec::with_capacity(points.len() * 6);
    for p in points {
        let c = transform.project_point3(Vec3::from(p.pos));
        let corner = |sx: f32, sy: f32| FlatVertex {
            pos: [c.x + sx * half.x, c.y + sy * half.y, c.z],
            color: p.color,
        };
        let quad = [corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)];
        out.extend([0, 1, 2, 0, 2, 3].map(|i| quad[i]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::ZIndex;

    // ── points ────────────────────────────────────────────────────────────

    #[test]
    fn ten_pixel_point_on_500px_content() {
        let half = point_half_extent(10.0, Viewport::new(500.0, 250.0));
        assert!((half.x - 0.02).abs() < 1e-6);
        assert!((half.y - 0.04).abs() < 1e-6);
    }

    #[test]
    fn points_expand_around_transformed_center() {
        let p = FlatVertex::flat(Vec2::new(0.1, 0.2), Color::YELLOW);
        let t = Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0));
        let quad = expand_points(&[p], t, Vec2::splat(0.1));

        assert_eq!(quad.len(), 6);
        let min_x = quad.iter().map(|v| v.pos[0]).fold(f32::MAX, f32::min);
        let max_y = quad.iter().map(|v| v.pos[1]).fold(f32::MIN, f32::max);
        assert!((min_x - 0.5).abs() < 1e-6);
        assert!((max_y - 0.3).abs() < 1e-6);
        assert!(quad.iter().all(|v| v.color == Color::YELLOW.to_array()));
    }

    // ── batching ──────────────────────────────────────────────────────────

    #[test]
    fn batches_follow_paint_order_and_skip_text() {
        let mut list = DrawList::new();
        list.push_axes(ZIndex(5), Mat4::IDENTITY, 1.0);
        list.push_quad(ZIndex(0), Mat4::from_scale(Vec3::splat(0.2)), Color::RED);
        list.push_text(
            ZIndex(1),
            "ignored",
            crate::text::FontId(0),
            16.0,
            Color::WHITE,
            Vec2::ZERO,
            None,
        );
        list.push_point(ZIndex(9), Vec2::ZERO, 10.0, Color::YELLOW);

        let (vertices, batches, uniforms) = build_batches(&list, Viewport::new(100.0, 100.0));

        assert_eq!(batches.len(), 3);
        assert_eq!(uniforms.len(), 3);
        assert_eq!(vertices.len(), 6 + 6 + 6);

        assert_eq!(batches[0], Batch { first: 0, count: 6, lines: false, clip: None });
        assert!(batches[1].lines);
        assert_eq!(batches[1].first, 6);
        assert!(!batches[2].lines);
        assert_eq!(uniforms[0].transform[0][0], 0.2);
        assert_eq!(uniforms[2].transform, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn batches_keep_clip_rects() {
        let mut list = DrawList::new();
        let clip = Rect::new(0.0, 0.0, 50.0, 50.0);
        list.push_clip(clip);
        list.push_fill(ZIndex(0), Color::RED);
        list.pop_clip();

        let (_, batches, _) = build_batches(&list, Viewport::new(100.0, 100.0));
        assert_eq!(batches[0].clip, Some(clip));
    }
}
