use std::path::Path;

use gfxlab_engine::geometry::{primitives, MeshData};
use gfxlab_engine::render::TextureImage;

const CHECKER_SIZE: u32 = 256;
const CHECKER_CELLS: u32 = 8;

/// Octahedron with one panorama wrapped around the equator.
pub fn panorama_octahedron() -> MeshData {
    primitives::octahedron().with_uvs(primitives::octahedron_panorama_uvs())
}

pub fn load_texture(path: &Path) -> TextureImage {
    TextureImage::from_path(path).unwrap_or_else(|err| {
        log::warn!("{err}; using a checkerboard");
        TextureImage::checker(CHECKER_SIZE, CHECKER_CELLS, [200, 200, 200, 255], [60, 60, 60, 255])
    })
}
