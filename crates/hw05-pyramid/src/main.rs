//! Textured square pyramid under a perspective camera, rotated with an arcball.

mod texture;

use std::path::Path;

use anyhow::Result;

use gfxlab_engine::camera::{Arcball, Projection};
use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::geometry::{primitives, MeshData};
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{FlatRenderer, GpuMesh, GpuTexture, MeshDraw, MeshRenderer, TextureImage};
use gfxlab_engine::scene::{DrawList, ZIndex};
use gfxlab_engine::window::{Runtime, RuntimeConfig};

const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sunrise.jpg");
const AXES_LENGTH: f32 = 1.5;

struct PyramidApp {
    data: MeshData,
    image: Option<TextureImage>,
    mesh: Option<GpuMesh>,
    texture: Option<GpuTexture>,

    arcball: Arcball,
    projection: Projection,

    meshes: MeshRenderer,
    axes: FlatRenderer,
    list: DrawList,
}

impl App for PyramidApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.arcball.handle_input(ctx.input, ctx.input_frame, ctx.pointer_ndc());

        let content = ctx.content_rect().size;
        let aspect = content.x / content.y.max(1.0);
        let view = self.arcball.view_matrix();
        let proj = self.projection.matrix(aspect);

        self.list.clear();
        self.list.push_axes(ZIndex::GUIDES, proj * view, AXES_LENGTH);

        let uniform = texture::pyramid_uniform(self.image.as_ref(), view, proj);

        ctx.render(Color::BLACK, |rctx, target| {
            let mesh = self.mesh.get_or_insert_with(|| GpuMesh::upload(rctx.device, &self.data, "pyramid"));
            if let Some(image) = self.image.as_ref().filter(|_| self.texture.is_none()) {
                self.texture = Some(GpuTexture::upload(rctx.device, rctx.queue, image, "sunrise"));
            }
            let draw = MeshDraw { mesh, texture: self.texture.as_ref(), uniform };
            self.meshes.render(rctx, target, &[draw]);
            self.axes.render(rctx, target, &self.list);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let data = primitives::pyramid();
    data.validate()?;

    let app = PyramidApp {
        data,
        image: texture::load_or_vertex_colors(Path::new(TEXTURE_PATH)),
        mesh: None,
        texture: None,
        arcball: Arcball::new(5.0),
        projection: Projection::perspective_deg(60.0, 0.1, 100.0),
        meshes: MeshRenderer::new(),
        axes: FlatRenderer::with_depth_test(),
        list: DrawList::new(),
    };

    Runtime::run(RuntimeConfig::square("hw05 - pyramid", 700.0), GpuInit::display_space(), app)
}
