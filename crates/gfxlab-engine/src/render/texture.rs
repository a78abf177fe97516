//! CPU images and their GPU textures.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Error returned while loading a texture image.
#[derive(Debug)]
pub enum TextureError {
    Io { path: PathBuf, source: std::io::Error },
    Decode { label: String, source: image::ImageError },
    ZeroSize { label: String },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io { path, source } => {
                write!(f, "failed to read texture {}: {source}", path.display())
            }
            TextureError::Decode { label, source } => {
                write!(f, "failed to decode texture {label}: {source}")
            }
            TextureError::ZeroSize { label } => write!(f, "texture {label} has zero size"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io { source, .. } => Some(source),
            TextureError::Decode { source, .. } => Some(source),
            TextureError::ZeroSize { .. } => None,
        }
    }
}

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextureImage {
    /// Loads and decodes a PNG or JPEG file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_memory(&path.display().to_string(), &bytes)
    }

    /// Decodes an encoded image held in memory.
    pub fn from_memory(label: &str, bytes: &[u8]) -> Result<Self, TextureError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|source| TextureError::Decode { label: label.to_string(), source })?
            .into_rgba8();

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroSize { label: label.to_string() });
        }
        log::debug!("decoded texture {label}: {width}x{height}");
        Ok(Self { width, height, rgba: decoded.into_raw() })
    }

    /// 1x1 image of a single color.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self { width: 1, height: 1, rgba: rgba.to_vec() }
    }

    /// `size` x `size` checkerboard with `cells` squares per side.
    pub fn checker(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                rgba.extend_from_slice(if even { &a } else { &b });
            }
        }
        Self { width: size, height: size, rgba }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA of one texel; panics outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Sampled 2D texture on the GPU (Rgba8Unorm, linear filtering, clamp-to-edge).
///
/// Each texture carries a process-unique id so renderers can cache bind
/// groups per texture.
#[derive(Debug)]
pub struct GpuTexture {
    id: u64,
    size: (u32, u32),
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        label: &str,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            size: (image.width, image.height),
            _texture: texture,
            view,
            sampler,
        }
    }

    /// 1x1 white texture; sampling it leaves vertex colors unchanged.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::upload(device, queue, &TextureImage::solid([255; 4]), "gfxlab white texture")
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}
