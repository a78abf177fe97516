//! gfxlab engine crate.
//!
//! Shared platform + GPU runtime for the course exercises: window loop,
//! input, timing, shader programs, renderers, cameras and mesh geometry.
//! Each exercise binary drives it through [`core::App`].

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;

pub mod camera;
pub mod geometry;

/// Math types used across the public API.
pub use glam;
