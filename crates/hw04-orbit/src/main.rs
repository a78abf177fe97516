//! Sun, earth and moon squares composed from nested rotations and translations.

mod system;

use anyhow::Result;

use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::glam::Mat4;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::FlatRenderer;
use gfxlab_engine::scene::{DrawList, ZIndex};
use gfxlab_engine::window::{Runtime, RuntimeConfig};

use system::Angles;

const AXES_LENGTH: f32 = 0.8;

#[derive(Default)]
struct Orbit {
    angles: Angles,
    flat: FlatRenderer,
    list: DrawList,
}

impl App for Orbit {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.angles.advance(ctx.time.dt);

        self.list.clear();
        // Axes first; the bodies paint over them.
        self.list.push_axes(ZIndex::SCENE, Mat4::IDENTITY, AXES_LENGTH);
        self.list.push_quad(ZIndex::SCENE, self.angles.sun(), Color::RED);
        self.list.push_quad(ZIndex::SCENE, self.angles.earth(), Color::CYAN);
        self.list.push_quad(ZIndex::SCENE, self.angles.moon(), Color::YELLOW);

        let (flat, list) = (&mut self.flat, &mut self.list);
        ctx.render(Color::opaque(0.2, 0.3, 0.4), |rctx, target| flat.render(rctx, target, list))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("hw04: sun, earth and moon on nested transforms");
    Runtime::run(RuntimeConfig::square("hw04 - orbit", 700.0), GpuInit::display_space(), Orbit::default())
}
