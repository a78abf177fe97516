//! Drag out a circle, then a line segment, and see where they intersect.

mod sketch;

use anyhow::Result;

use gfxlab_engine::core::{App, AppControl, FrameCtx};
use gfxlab_engine::device::GpuInit;
use gfxlab_engine::glam::Mat4;
use gfxlab_engine::input::MouseButton;
use gfxlab_engine::logging::{init_logging, LoggingConfig};
use gfxlab_engine::paint::Color;
use gfxlab_engine::render::{FlatRenderer, TextRenderer};
use gfxlab_engine::scene::{DrawList, ZIndex};
use gfxlab_engine::text::TextOverlay;
use gfxlab_engine::window::{Runtime, RuntimeConfig};

use sketch::{Circle, Preview, Segment, Sketch};

const CIRCLE_SEGMENTS: u32 = 100;
const POINT_SIZE: f32 = 10.0;
const CIRCLE_COLOR: Color = Color::MAGENTA;
const SEGMENT_COLOR: Color = Color::opaque(0.5, 0.5, 1.0);
const PREVIEW_COLOR: Color = Color::GRAY;

struct Intersection {
    sketch: Sketch,
    overlay: TextOverlay,
    flat: FlatRenderer,
    text: TextRenderer,
    list: DrawList,
}

impl Intersection {
    fn handle_pointer(&mut self, ctx: &FrameCtx<'_, '_>) {
        let pointer = ctx.pointer_ndc();
        let frame = ctx.input_frame;
        if let Some(p) = pointer {
            if frame.buttons_pressed.contains(&MouseButton::Left) {
                self.sketch.press(p);
            }
            if ctx.input.button_down(MouseButton::Left) {
                self.sketch.move_to(p);
            }
        }
        if frame.buttons_released.contains(&MouseButton::Left) {
            let completed = match pointer {
                Some(p) => self.sketch.release(p),
                None => self.sketch.release_in_place(),
            };
            if completed {
                log::info!("{}", self.sketch.describe().join(" | "));
            }
        }
    }

    fn push_circle(&mut self, c: Circle, color: Color) {
        self.list.push_circle_outline(ZIndex::SCENE, c.center, c.radius, CIRCLE_SEGMENTS, color);
    }

    fn push_segment(&mut self, s: Segment, color: Color) {
        self.list.push_segment(ZIndex::SCENE, s.a, s.b, color);
    }
}

impl App for Intersection {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.handle_pointer(ctx);

        self.list.clear();
        self.list.push_axes(ZIndex::SCENE, Mat4::IDENTITY, 0.8);
        if let Some(c) = self.sketch.circle() {
            self.push_circle(c, CIRCLE_COLOR);
        }
        if let Some(s) = self.sketch.segment() {
            self.push_segment(s, SEGMENT_COLOR);
        }
        match self.sketch.preview() {
            Some(Preview::Circle(c)) => self.push_circle(c, PREVIEW_COLOR),
            Some(Preview::Segment(s)) => self.push_segment(s, PREVIEW_COLOR),
            None => {}
        }
        if let Some(points) = self.sketch.intersections() {
            self.list.push_points(ZIndex::GUIDES, &points, POINT_SIZE, Color::YELLOW);
        }
        self.overlay.push_lines(&mut self.list, self.sketch.describe());

        let Self { overlay, flat, text, list, .. } = self;
        ctx.render(Color::BLACK, |rctx, target| {
            flat.render(rctx, target, list);
            text.render(rctx, target, list, overlay.fonts());
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = Intersection {
        sketch: Sketch::default(),
        overlay: TextOverlay::new(),
        flat: FlatRenderer::new(),
        text: TextRenderer::new(),
        list: DrawList::new(),
    };

    Runtime::run(RuntimeConfig::square("hw07 - intersection", 700.0), GpuInit::display_space(), app)
}
