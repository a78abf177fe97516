use crate::scene::shapes::shape::ShapeCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// `Shape` is drawn by `render::FlatRenderer`, `Text` by
/// `render::TextRenderer`; each renderer skips the other's commands.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Shape(ShapeCmd),
    Text(TextCmd),
}
