//! Surface configuration policies, kept free of live GPU objects so they can
//! be tested.

use winit::dpi::PhysicalSize;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    let wanted: &[wgpu::TextureFormat] = if prefer_srgb {
        &[wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
    } else {
        &[wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };

    wanted
        .iter()
        .copied()
        .find(|f| caps.formats.contains(f))
        .or_else(|| {
            // Otherwise stay on the requested side of the sRGB split if possible.
            caps.formats
                .iter()
                .copied()
                .find(|f| f.is_srgb() == prefer_srgb)
        })
        .or_else(|| caps.formats.first().copied())
}

/// Opaque when the surface offers it, so cleared colors are not blended
/// with whatever lies behind the window.
pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    let opaque = wgpu::CompositeAlphaMode::Opaque;
    if caps.alpha_modes.contains(&opaque) {
        opaque
    } else {
        caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

pub(crate) fn create_depth_view(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: PhysicalSize<u32>,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("gfxlab depth texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
