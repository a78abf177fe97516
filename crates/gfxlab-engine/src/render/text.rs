use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use fontdue::Font;

use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList, TextCmd};
use crate::text::FontSystem;

use super::program::{Program, ProgramDesc};
use super::shader::ShaderSource;
use super::{RenderCtx, RenderTarget};

const ATLAS_SIZE: u32 = 1024;
const GAP: u32 = 1;

/// Row-by-row free-space cursor over a square atlas.
///
/// A glyph goes to the right of the previous one; when the row is out of
/// width the cursor drops below the tallest glyph placed in it.
#[derive(Debug, Clone, PartialEq)]
struct Shelves {
    size: u32,
    x: u32,
    y: u32,
    tallest: u32,
    exhausted: bool,
}

impl Shelves {
    fn new(size: u32) -> Self {
        Self { size, x: GAP, y: GAP, tallest: 0, exhausted: false }
    }

    fn alloc(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        let fits = |extent: u32, at: u32, size: u32| at + extent + GAP <= size;
        if self.exhausted || !fits(w, GAP, self.size) {
            return None;
        }
        if !fits(w, self.x, self.size) {
            self.y += self.tallest + GAP;
            self.x = GAP;
            self.tallest = 0;
        }
        if !fits(h, self.y, self.size) {
            self.exhausted = true;
            return None;
        }
        let at = (self.x, self.y);
        self.x += w + GAP;
        self.tallest = self.tallest.max(h);
        Some(at)
    }
}

/// Atlas UV rectangle as `[u0, v0, u1, v1]`.
type GlyphUv = [f32; 4];

/// R8 coverage atlas filled lazily with fontdue rasterizations.
struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    shelves: Shelves,
    cached: HashMap<GlyphRasterConfig, GlyphUv>,
    reported_full: bool,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gfxlab glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gfxlab glyph sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            texture,
            view,
            sampler,
            shelves: Shelves::new(ATLAS_SIZE),
            cached: HashMap::new(),
            reported_full: false,
        }
    }

    /// UVs of `key`, rasterizing and uploading it on first use.
    fn glyph(&mut self, queue: &wgpu::Queue, font: &Font, key: GlyphRasterConfig) -> Option<GlyphUv> {
        if let Some(uv) = self.cached.get(&key) {
            return Some(*uv);
        }

        let (metrics, coverage) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }
        let Some((x, y)) = self.shelves.alloc(w, h) else {
            if !std::mem::replace(&mut self.reported_full, true) {
                log::warn!("glyph atlas is full; text using new glyphs will be incomplete");
            }
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &coverage,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let s = ATLAS_SIZE as f32;
        let uv = [x as f32 / s, y as f32 / s, (x + w) as f32 / s, (y + h) as f32 / s];
        self.cached.insert(key, uv);
        Some(uv)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TextUniform {
    viewport: [f32; 2],
    _pad: [f32; 2],
}

/// One glyph quad, in content-relative physical pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct GlyphQuad {
    dst: [f32; 4],
    uv: GlyphUv,
    color: [f32; 4],
}

fn glyph_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x4];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GlyphQuad>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    }
}

/// Splits `clips` into maximal runs of equal values, as index ranges.
fn clip_runs(clips: &[Option<Rect>]) -> Vec<(std::ops::Range<u32>, Option<Rect>)> {
    let mut runs: Vec<(std::ops::Range<u32>, Option<Rect>)> = Vec::new();
    for (i, clip) in clips.iter().enumerate() {
        let i = i as u32;
        match runs.last_mut() {
            Some((range, last)) if last == clip => range.end = i + 1,
            _ => runs.push((i..i + 1, *clip)),
        }
    }
    runs
}

/// Draws the `DrawCmd::Text` entries of a draw list.
///
/// Glyphs are laid out and rasterized by fontdue at the physical text size,
/// so text stays crisp on high-DPI displays.
pub struct TextRenderer {
    program: Option<Program<TextUniform>>,
    atlas: Option<(GlyphAtlas, Option<wgpu::BindGroup>)>,
    quads: Option<(wgpu::Buffer, usize)>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            program: None,
            atlas: None,
            quads: None,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `cmd` and appends its glyph quads.
    fn lay_out(
        layout: &mut Layout<()>,
        atlas: &mut GlyphAtlas,
        queue: &wgpu::Queue,
        font: &Font,
        cmd: &TextCmd,
        scale: f32,
        out: &mut Vec<GlyphQuad>,
    ) -> usize {
        layout.reset(&LayoutSettings {
            x: cmd.origin.x * scale,
            y: cmd.origin.y * scale,
            max_width: cmd.max_width.map(|w| w * scale),
            ..LayoutSettings::default()
        });
        layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        let before = out.len();
        for g in layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let Some(uv) = atlas.glyph(queue, font, g.key) else { continue };
            out.push(GlyphQuad {
                dst: [g.x, g.y, g.x + g.width as f32, g.y + g.height as f32],
                uv,
                color: cmd.color.to_array(),
            });
        }
        out.len() - before
    }

    /// Renders every text command of `list`, in paint order, over what is
    /// already in `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &DrawList, fonts: &FontSystem) {
        let texts: Vec<(TextCmd, Option<Rect>)> = list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Text(cmd) => Some((cmd.clone(), item.clip_rect)),
                _ => None,
            })
            .collect();
        if texts.is_empty() {
            return;
        }

        if self.program.as_ref().is_none_or(|p| p.surface_format() != ctx.surface_format) {
            let source = ShaderSource::embedded("gfxlab text shader", include_str!("shaders/text.wgsl"));
            let layouts = [glyph_layout()];
            let desc = ProgramDesc { textured: true, ..ProgramDesc::new("gfxlab text", &layouts) };
            self.program = Some(Program::new(ctx, &source, &desc));
            // The atlas bind group belongs to the old pipeline layout.
            if let Some((_, group)) = self.atlas.as_mut() {
                *group = None;
            }
        }
        let Some(program) = self.program.as_mut() else { return };
        let (atlas, atlas_group) = self.atlas.get_or_insert_with(|| (GlyphAtlas::new(ctx.device), None));

        let scale = ctx.scale_factor.max(0.01);
        let mut quads = Vec::new();
        let mut clips = Vec::new();
        for (cmd, clip) in &texts {
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("text uses unregistered {:?}; skipped", cmd.font);
                continue;
            };
            let added = Self::lay_out(&mut self.layout, atlas, ctx.queue, font, cmd, scale, &mut quads);
            clips.extend(std::iter::repeat_n(*clip, added));
        }
        if quads.is_empty() {
            return;
        }

        let (_, _, w, h) = ctx.content_physical();
        program.upload(ctx, &[TextUniform { viewport: [w, h], _pad: [0.0; 2] }]);

        if atlas_group.is_none() {
            *atlas_group = program.texture_view_bind_group(ctx.device, &atlas.view, &atlas.sampler);
        }
        let Some(atlas_group) = atlas_group.as_ref() else { return };

        if self.quads.as_ref().is_none_or(|(_, cap)| *cap < quads.len()) {
            let cap = quads.len().next_power_of_two().max(64);
            let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("gfxlab glyph quads"),
                size: (cap * std::mem::size_of::<GlyphQuad>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.quads = Some((buffer, cap));
        }
        let Some((buffer, _)) = self.quads.as_ref() else { return };
        ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(&quads));

        let mut rpass = target.begin_load_pass("gfxlab text pass");
        ctx.set_content_viewport(&mut rpass);
        if !program.bind(&mut rpass, 0) {
            return;
        }
        rpass.set_bind_group(1, atlas_group, &[]);
        rpass.set_vertex_buffer(0, buffer.slice(..));

        for (range, clip) in clip_runs(&clips) {
            if let Some((x, y, w, h)) = ctx.clip_to_scissor(clip) {
                rpass.set_scissor_rect(x, y, w, h);
                rpass.draw(0..6, range);
            }
        }
    }
}
