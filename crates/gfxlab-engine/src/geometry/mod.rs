//! CPU-side geometry: mesh data, primitive solids and the small amount of
//! analytic geometry the exercises need.

pub mod intersect;
pub mod normals;
pub mod primitives;

mod mesh_data;

pub use intersect::segment_circle;
pub use mesh_data::{MeshData, MeshError};
pub use normals::flat_normals;
