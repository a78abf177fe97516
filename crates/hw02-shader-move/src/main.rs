//! A square moved with the arrow keys through a shader uniform.
//!
//! The shader program is read from `shaders/move.wgsl` before the window
//! opens; a missing or malformed file aborts the program.

mod motion;
mod square;

use anyhow::{Context, Result};

use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{FlatRenderer, ShaderSource, TextRenderer};
use gfxlab_engine::scene::DrawList;
use gfxlab_engine::text::TextOverlay;
use gfxlab_engine::window::{Runtime, RuntimeConfig};

use motion::HeldMotion;
use square::MovingSquare;

const SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/move.wgsl");

struct ShaderMove {
    square: MovingSquare,
    motion: HeldMotion,
    overlay: TextOverlay,
    flat: FlatRenderer,
    text: TextRenderer,
    list: DrawList,
}

impl App for ShaderMove {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.motion.handle_events(ctx.input_frame);
        self.motion.step();

        self.list.clear();
        self.overlay.push_line(&mut self.list, 1, "Use arrow keys to move the rectangle");

        let offset = self.motion.offset();
        let Self { square, overlay, flat, text, list, .. } = self;
        ctx.render(Color::BLACK, |rctx, target| {
            square.render(rctx, target, offset, Color::RED);
            flat.render(rctx, target, list);
            text.render(rctx, target, list, overlay.fonts());
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let source = ShaderSource::from_file(SHADER_PATH)
        .and_then(|s| s.require_entry_points(&["vs_main", "fs_main"]))
        .with_context(|| format!("failed to load shader program from {SHADER_PATH}"))?;
    log::info!("loaded shader {}", source.label());

    let app = ShaderMove {
        square: MovingSquare::new(source),
        motion: HeldMotion::default(),
        overlay: TextOverlay::new(),
        flat: FlatRenderer::new(),
        text: TextRenderer::new(),
        list: DrawList::new(),
    };

    Runtime::run(RuntimeConfig::square("hw02 - shader move", 600.0), GpuInit::display_space(), app)
}
