//! Texture assets: the one image the cube mesh is wrapped in.
//!
//! The renderer asks a [`TextureSource`] for an image by opaque id exactly
//! once, when its surface is created. Decoding happens here; uploading is the
//! backend's job.

mod source;
mod texture;

pub use source::{AssetDir, Checkerboard, Fallback, TextureSource};
pub use texture::TextureImage;

use std::path::PathBuf;

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("image has no pixels: {}", .0.display())]
    Empty(PathBuf),
}
