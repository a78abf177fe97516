//! Per-window GPU state: device, queue, configured surface and depth buffer.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};

/// Depth format shared by every pipeline that draws into a frame.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
