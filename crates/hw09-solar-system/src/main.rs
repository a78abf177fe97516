//! Toy solar system: a sun and four lit planets on orbit groups, viewed
//! through switchable perspective/orthographic orbit cameras.
//!
//! Keys: `C` switches camera, `1`-`4` select a planet, arrows change its
//! rotation (Up/Down) and orbit (Right/Left) speed.

mod cameras;
mod panel;
mod planets;

use std::path::Path;

use anyhow::Result;

use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::geometry::{primitives, MeshData};
use gfxlab_engine::glam::{Mat4, Vec3};
use gfxlab_engine::input::Key;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{
    GpuMesh, GpuTexture, Lighting, MeshDraw, MeshRenderer, MeshUniform, RenderCtx, TextRenderer,
    TextureImage,
};
use gfxlab_engine::scene::DrawList;
use gfxlab_engine::text::TextOverlay;
use gfxlab_engine::time::FpsCounter;
use gfxlab_engine::window::{Runtime, RuntimeConfig};

use cameras::CameraRig;
use panel::ControlPanel;
use planets::{parse_planets, Planet};

const ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");
const SPHERE_SEGMENTS: u32 = 32;
const SUN_RADIUS: f32 = 10.0;
const ROUGHNESS: f32 = 0.8;
const METALNESS: f32 = 0.2;

/// CPU-side body: mesh data plus an optional decoded texture.
struct Body {
    data: MeshData,
    image: Option<TextureImage>,
}

#[derive(Default)]
struct GpuBodies {
    meshes: Vec<GpuMesh>,
    textures: Vec<Option<GpuTexture>>,
}

struct SolarSystem {
    planets: Vec<Planet>,
    sun: MeshData,
    bodies: Vec<Body>,
    gpu: Option<GpuBodies>,
    sun_mesh: Option<GpuMesh>,

    lighting: Lighting,
    cameras: CameraRig,
    panel: ControlPanel,
    fps: FpsCounter,

    meshes: MeshRenderer,
    overlay: TextOverlay,
    text: TextRenderer,
    list: DrawList,
}

impl SolarSystem {
    fn new(planets: Vec<Planet>) -> Self {
        let bodies = planets
            .iter()
            .map(|p| Body {
                data: primitives::uv_sphere(p.config.radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
                image: p.config.texture.as_deref().and_then(|file| load_texture(&Path::new(ASSETS).join(file))),
            })
            .collect();

        Self {
            planets,
            sun: primitives::uv_sphere(SUN_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
            bodies,
            gpu: None,
            sun_mesh: None,
            lighting: Lighting {
                direction: Vec3::new(5.0, 12.0, 8.0),
                color: Color::WHITE,
                ambient: Color::from_hex_rgb(0x333333),
            },
            cameras: CameraRig::new(),
            panel: ControlPanel::default(),
            fps: FpsCounter::new(),
            meshes: MeshRenderer::new(),
            overlay: TextOverlay::new(),
            text: TextRenderer::new(),
            list: DrawList::new(),
        }
    }

    fn handle_keys(&mut self, ctx: &FrameCtx<'_, '_>) {
        // Camera switch on the initial press only; speed keys auto-repeat.
        if ctx.input_frame.keys_pressed.contains(&Key::C) {
            self.cameras.toggle();
        }
        for key in ctx.input_frame.key_down_events() {
            self.panel.handle_key(key, &mut self.planets);
        }
    }

    fn upload_bodies(&self, rctx: &RenderCtx<'_>) -> GpuBodies {
        let mut gpu = GpuBodies::default();
        for (body, planet) in self.bodies.iter().zip(&self.planets) {
            gpu.meshes.push(GpuMesh::upload(rctx.device, &body.data, planet.name()));
            gpu.textures.push(
                body.image
                    .as_ref()
                    .map(|img| GpuTexture::upload(rctx.device, rctx.queue, img, planet.name())),
            );
        }
        gpu
    }

    fn draws<'a>(&self, gpu: &'a GpuBodies, sun: &'a GpuMesh, aspect: f32) -> Vec<MeshDraw<'a>> {
        let view = self.cameras.view();
        let proj = self.cameras.projection_matrix(aspect);
        let eye = self.cameras.eye();

        let mut draws = vec![MeshDraw {
            mesh: sun,
            texture: None,
            uniform: MeshUniform::new(Mat4::IDENTITY, view, proj).with_base_color(Color::YELLOW),
        }];
        for ((planet, mesh), texture) in self.planets.iter().zip(&gpu.meshes).zip(&gpu.textures) {
            let base = if texture.is_some() { Color::WHITE } else { planet.color };
            let uniform = MeshUniform::new(planet.model(), view, proj)
                .with_base_color(base)
                .textured(texture.is_some())
                .lit(&self.lighting, eye, ROUGHNESS, METALNESS);
            draws.push(MeshDraw { mesh, texture: texture.as_ref(), uniform });
        }
        draws
    }
}

impl App for SolarSystem {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let content = ctx.content_rect().size;
        self.handle_keys(ctx);
        self.cameras.update(ctx.input, ctx.input_frame, content.y);
        for planet in &mut self.planets {
            planet.advance(ctx.time.dt);
        }
        self.fps.record(ctx.time.now);

        self.list.clear();
        let mut lines = vec![
            format!("FPS: {:.0}", self.fps.fps()),
            format!("Camera: {}  (C to switch)", self.cameras.active().label()),
        ];
        lines.extend(self.panel.describe(&self.planets));
        self.overlay.push_lines(&mut self.list, lines);

        let aspect = content.x / content.y.max(1.0);
        ctx.render(Color::BLACK, |rctx, target| {
            if self.sun_mesh.is_none() {
                self.sun_mesh = Some(GpuMesh::upload(rctx.device, &self.sun, "sun"));
            }
            if self.gpu.is_none() {
                self.gpu = Some(self.upload_bodies(rctx));
            }
            let (Some(sun), Some(gpu)) = (self.sun_mesh.as_ref(), self.gpu.as_ref()) else { return };

            let draws = self.draws(gpu, sun, aspect);
            self.meshes.render(rctx, target, &draws);
            self.text.render(rctx, target, &self.list, self.overlay.fonts());
        })
    }
}

fn load_texture(path: &Path) -> Option<TextureImage> {
    TextureImage::from_path(path)
        .inspect_err(|err| log::warn!("{err}; using the configured color"))
        .ok()
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let planets: Vec<Planet> = parse_planets(include_str!("../assets/planets.json"))?
        .into_iter()
        .map(Planet::new)
        .collect();
    log::info!("loaded {} planets", planets.len());

    let config = RuntimeConfig { title: "hw09 - solar system".to_string(), ..RuntimeConfig::default() };
    Runtime::run(config, GpuInit::display_space(), SolarSystem::new(planets))
}
