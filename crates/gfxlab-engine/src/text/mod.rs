//! Fonts and the text overlay.
//!
//! Glyph rasterization and drawing live in `render::text`; this module only
//! owns parsed fonts and the on-screen overlay helper built on them.

mod font_system;
mod overlay;
mod system;

pub use font_system::{FontId, FontSystem};
pub use overlay::{TextOverlay, OVERLAY_FONT_SIZE, OVERLAY_LINE_HEIGHT};
pub use system::{load_system_font, SYSTEM_FONT_PATHS};
