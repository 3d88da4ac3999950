//! wgpu render backend for the cube demo.
//!
//! Draws the five textured cubes of a composed frame as instances of one
//! cube mesh, with an optional eye-space point light.
//!
//! # Invariants
//! - Renderer never writes scene state; rotation integration happens in
//!   [`mackcube_render::FrameRenderer::render_frame`].
//! - The cube texture is uploaded once per surface creation.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::{GpuError, GpuSurface, WgpuRenderer};
pub use mesh::{CubeGeometry, CubeMesh, MeshVertex};
