//! Four viewports cleared to different colors, kept square on resize.

mod quadrants;

use anyhow::Result;

use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::FlatRenderer;
use gfxlab_engine::scene::{DrawList, ZIndex};
use gfxlab_engine::window::{Runtime, RuntimeConfig};

use quadrants::quadrants;

#[derive(Default)]
struct Viewports {
    flat: FlatRenderer,
    list: DrawList,
}

impl App for Viewports {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.list.clear();
        for (rect, color) in quadrants(ctx.content_rect().size) {
            self.list.push_clip(rect);
            self.list.push_fill(ZIndex::SCENE, color);
            self.list.pop_clip();
        }

        let (flat, list) = (&mut self.flat, &mut self.list);
        ctx.render(Color::BLACK, |rctx, target| flat.render(rctx, target, list))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("hw01: resize the window, the content stays square");

    Runtime::run(
        RuntimeConfig::square("hw01 - viewports", 500.0),
        GpuInit::display_space(),
        Viewports::default(),
    )
}
