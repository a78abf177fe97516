//! Panorama-textured regular octahedron, rotated with an arcball.

mod solid;

use std::path::Path;

use anyhow::Result;

use gfxlab_engine::camera::{Arcball, Projection};
use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::geometry::MeshData;
use gfxlab_engine::glam::Mat4;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{FlatRenderer, GpuMesh, GpuTexture, MeshDraw, MeshRenderer, MeshUniform, TextureImage};
use gfxlab_engine::scene::{DrawList, ZIndex};
use gfxlab_engine::window::{Runtime, RuntimeConfig};

const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sunrise.jpg");

struct OctahedronApp {
    data: MeshData,
    image: TextureImage,
    gpu: Option<(GpuMesh, GpuTexture)>,
    model: Mat4,

    arcball: Arcball,
    projection: Projection,

    meshes: MeshRenderer,
    axes: FlatRenderer,
    list: DrawList,
}

impl App for OctahedronApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.arcball.handle_input(ctx.input, ctx.input_frame, ctx.pointer_ndc());

        let content = ctx.content_rect().size;
        let view = self.arcball.view_matrix();
        let proj = self.projection.matrix(content.x / content.y.max(1.0));

        self.list.clear();
        self.list.push_axes(ZIndex::GUIDES, proj * view, 1.5);

        let uniform = MeshUniform::new(self.model, view, proj).textured(true);
        ctx.render(Color::BLACK, |rctx, target| {
            let (mesh, texture) = &*self.gpu.get_or_insert_with(|| {
                (
                    GpuMesh::upload(rctx.device, &self.data, "octahedron"),
                    GpuTexture::upload(rctx.device, rctx.queue, &self.image, "sunrise"),
                )
            });
            self.meshes.render(rctx, target, &[MeshDraw { mesh, texture: Some(texture), uniform }]);
            self.axes.render(rctx, target, &self.list);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let data = solid::panorama_octahedron();
    data.validate()?;

    let app = OctahedronApp {
        data,
        image: solid::load_texture(Path::new(TEXTURE_PATH)),
        gpu: None,
        model: Mat4::IDENTITY,
        arcball: Arcball::new(5.0).with_sensitivity(2.0, 0.0005),
        projection: Projection::perspective_deg(60.0, 0.1, 100.0),
        meshes: MeshRenderer::new(),
        axes: FlatRenderer::with_depth_test(),
        list: DrawList::new(),
    };

    Runtime::run(RuntimeConfig::square("hw06 - octahedron", 700.0), GpuInit::display_space(), app)
}
