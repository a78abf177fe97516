pub(crate) mod shape;
pub(crate) mod text;

pub use shape::{FlatVertex, ShapeCmd, Topology};
pub use text::TextCmd;
