use bytemuck::Pod;

use crate::device::DEPTH_FORMAT;

use super::ctx::RenderCtx;
use super::shader::ShaderSource;
use super::texture::GpuTexture;
use super::uniform::UniformSlots;

/// How a pipeline uses the frame depth buffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DepthMode {
    /// Always passes, never writes (2D overlays).
    #[default]
    Ignore,
    /// Tests against existing depth without writing.
    TestOnly,
    /// Standard opaque 3D: less-equal test plus write.
    TestAndWrite,
}

impl DepthMode {
    fn state(self) -> wgpu::DepthStencilState {
        let (write, compare) = match self {
            DepthMode::Ignore => (false, wgpu::CompareFunction::Always),
            DepthMode::TestOnly => (false, wgpu::CompareFunction::LessEqual),
            DepthMode::TestAndWrite => (true, wgpu::CompareFunction::LessEqual),
        };
        wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: Default::default(),
            bias: Default::default(),
        }
    }
}

/// Fixed-function description of a [`Program`].
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
    pub depth: DepthMode,
    /// Adds a texture + sampler bind group at group 1.
    pub textured: bool,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: Option<wgpu::BlendState>,
}

impl<'a> ProgramDesc<'a> {
    /// Untextured triangle list, premultiplied alpha blending, no depth.
    pub fn new(label: &'a str, vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>]) -> Self {
        Self {
            label,
            vertex_layouts,
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth: DepthMode::Ignore,
            textured: false,
            cull_mode: None,
            blend: Some(premul_alpha_blend()),
        }
    }
}

pub(crate) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

/// A compiled shader program: one render pipeline plus its uniform storage.
///
/// Bind group layout:
/// - group 0, binding 0: `U` uniform block, selected per draw by dynamic offset
/// - group 1 (only when `textured`): binding 0 texture, binding 1 sampler
///
/// Shaders must use entry points `vs_main` and `fs_main`.
pub struct Program<U: Pod> {
    label: String,
    surface_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: Option<wgpu::BindGroupLayout>,
    uniforms: UniformSlots<U>,
    uniform_bind_group: Option<(u64, wgpu::BindGroup)>,
}

impl<U: Pod> Program<U> {
    pub fn new(ctx: &RenderCtx<'_>, source: &ShaderSource, desc: &ProgramDesc<'_>) -> Self {
        let device = ctx.device;
        let shader = source.create_module(device);

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} uniform bgl", desc.label)),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: Some(UniformSlots::<U>::binding_size()),
                },
                count: None,
            }],
        });

        let texture_layout = desc.textured.then(|| texture_bind_group_layout(device, desc.label));

        let mut layouts = vec![&uniform_layout];
        if let Some(tl) = texture_layout.as_ref() {
            layouts.push(tl);
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} pipeline layout", desc.label)),
            bind_group_layouts: &layouts,
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} pipeline", desc.label)),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: desc.vertex_layouts,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: desc.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: desc.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(desc.depth.state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("built program {} ({:?})", desc.label, ctx.surface_format);

        Self {
            label: desc.label.to_string(),
            surface_format: ctx.surface_format,
            pipeline,
            uniform_layout,
            texture_layout,
            uniforms: UniformSlots::new(format!("{} uniforms", desc.label)),
            uniform_bind_group: None,
        }
    }

    /// Format the pipeline was built for; renderers rebuild when it changes.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Uploads this frame's uniform blocks; slot `i` is `items[i]`.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, items: &[U]) {
        self.uniforms.upload(ctx.device, ctx.queue, items);

        let generation = self.uniforms.generation();
        if self.uniform_bind_group.as_ref().is_some_and(|(g, _)| *g == generation) {
            return;
        }
        let Some(buffer) = self.uniforms.buffer() else { return };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} uniform bind group", self.label)),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: Some(UniformSlots::<U>::binding_size()),
                }),
            }],
        });
        self.uniform_bind_group = Some((generation, bind_group));
    }

    /// Sets the pipeline and selects uniform `slot`. Returns `false` if
    /// nothing has been uploaded yet.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, slot: usize) -> bool {
        let Some((_, bind_group)) = self.uniform_bind_group.as_ref() else { return false };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[self.uniforms.offset(slot)]);
        true
    }

    /// Creates the group-1 bind group for `texture`; `None` for untextured programs.
    pub fn texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &GpuTexture,
    ) -> Option<wgpu::BindGroup> {
        self.texture_view_bind_group(device, texture.view(), texture.sampler())
    }

    /// Like [`Program::texture_bind_group`] for textures not wrapped in a
    /// [`GpuTexture`] (glyph atlases, render targets).
    pub fn texture_view_bind_group(
        &self,
        device: &wgpu::Device,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> Option<wgpu::BindGroup> {
        let layout = self.texture_layout.as_ref()?;
        Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} texture bind group", self.label)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }))
    }
}

fn texture_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} texture bgl")),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}
