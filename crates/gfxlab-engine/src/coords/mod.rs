//! Coordinate and geometry types shared across renderers and exercises.
//!
//! Two spaces are in play:
//! - logical pixels (DPI-aware, origin top-left, +X right, +Y down) for
//!   window/pointer positions, clip rects and text
//! - normalized device coordinates (origin center, +Y up) for geometry
//!
//! `ndc` converts between them relative to the drawable content rect.

mod ndc;
mod rect;
mod viewport;

pub use glam::Vec2;
pub use ndc::{from_ndc, to_ndc};
pub use rect::Rect;
pub use viewport::{content_rect, AspectPolicy, Viewport};
