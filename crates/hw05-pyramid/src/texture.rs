use std::path::Path;

use gfxlab_engine::glam::Mat4;
use gfxlab_engine::render::{MeshUniform, TextureImage};

/// Loads the pyramid texture; `None` (with a warning) means the pyramid
/// falls back to its vertex colors.
pub fn load_or_vertex_colors(path: &Path) -> Option<TextureImage> {
    match TextureImage::from_path(path) {
        Ok(image) => {
            log::info!("texture {} ({}x{})", path.display(), image.width(), image.height());
            Some(image)
        }
        Err(err) => {
            log::warn!("{err}; drawing vertex colors instead");
            None
        }
    }
}

/// Identity-model uniform that samples the texture only when one loaded.
pub fn pyramid_uniform(image: Option<&TextureImage>, view: Mat4, proj: Mat4) -> MeshUniform {
    MeshUniform::new(Mat4::IDENTITY, view, proj).textured(image.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back() {
        assert!(load_or_vertex_colors(Path::new("definitely/not/here.jpg")).is_none());
    }

    #[test]
    fn undecodable_file_falls_back() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert!(load_or_vertex_colors(&path).is_none());
    }

    #[test]
    fn fallback_draws_vertex_colors_untextured() {
        let image = load_or_vertex_colors(Path::new("definitely/not/here.jpg"));
        let u = pyramid_uniform(image.as_ref(), Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(u.material[3], 0.0);
        assert_eq!(u.base_color, [1.0; 4]);
    }

    #[test]
    fn loaded_image_is_sampled() {
        let image = TextureImage::solid([255, 0, 0, 255]);
        assert_eq!(image.pixel(0, 0), [255, 0, 0, 255]);
        let u = pyramid_uniform(Some(&image), Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(u.material[3], 1.0);
    }
}
