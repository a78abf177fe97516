//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams (2D shapes, text) or explicit mesh
//! draws and issue GPU commands via wgpu. Each renderer owns its GPU
//! resources and creates them lazily on first use.
//!
//! Convention:
//! - shape and mesh geometry is in NDC/world space, transformed by a
//!   per-draw matrix uniform
//! - text and clip rects are in content-local logical pixels
//! - every pass binds the frame depth buffer; 2D pipelines ignore it

mod ctx;
mod program;
mod uniform;

pub mod flat;
pub mod mesh;
pub mod shader;
pub mod text;
pub mod texture;

pub use ctx::{logical_clip_to_scissor, RenderCtx, RenderTarget};
pub use flat::FlatRenderer;
pub use mesh::{normal_matrix, GpuMesh, Lighting, MeshDraw, MeshRenderer, MeshUniform};
pub use program::{DepthMode, Program, ProgramDesc};
pub use shader::{ShaderError, ShaderSource};
pub use text::TextRenderer;
pub use texture::{GpuTexture, TextureError, TextureImage};
pub use uniform::UniformSlots;
