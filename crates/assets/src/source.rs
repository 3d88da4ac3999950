use crate::{AssetError, TextureImage};
use std::path::{Path, PathBuf};

/// Supplies decoded textures by opaque asset id.
pub trait TextureSource {
    fn load_texture(&self, id: &str) -> Result<TextureImage, AssetError>;
}

/// Textures decoded from image files under a root directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureSource for AssetDir {
    fn load_texture(&self, id: &str) -> Result<TextureImage, AssetError> {
        let path = self.root.join(id);
        if !path.is_file() {
            return Err(AssetError::NotFound(path));
        }

        let image = image::open(&path)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(AssetError::Empty(path));
        }

        tracing::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(TextureImage::new(image))
    }
}

/// Procedural checkerboard, whatever the id.
#[derive(Debug, Clone, Copy)]
pub struct Checkerboard {
    pub size: u32,
    pub cell: u32,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self { size: 256, cell: 32 }
    }
}

impl TextureSource for Checkerboard {
    fn load_texture(&self, _id: &str) -> Result<TextureImage, AssetError> {
        Ok(TextureImage::checkerboard(self.size, self.cell))
    }
}

/// Wraps a source and substitutes a placeholder whenever it fails, so loading
/// never errors.
#[derive(Debug, Clone)]
pub struct Fallback<S> {
    primary: S,
    placeholder: Checkerboard,
}

impl<S: TextureSource> Fallback<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            placeholder: Checkerboard::default(),
        }
    }
}

impl<S: TextureSource> TextureSource for Fallback<S> {
    fn load_texture(&self, id: &str) -> Result<TextureImage, AssetError> {
        self.primary.load_texture(id).or_else(|e| {
            tracing::warn!("texture {id} unavailable ({e}), using checkerboard placeholder");
            self.placeholder.load_texture(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn loads_png_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        img.save(dir.path().join("crate.png")).unwrap();

        let source = AssetDir::new(dir.path());
        let texture = source.load_texture("crate.png").unwrap();
        assert_eq!((texture.width(), texture.height()), (4, 2));
        assert_eq!(texture.image().get_pixel(3, 1), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = AssetDir::new(dir.path());
        let err = source.load_texture("nope.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn undecodable_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("junk.png"), b"not a png").unwrap();
        let source = AssetDir::new(dir.path());
        let err = source.load_texture("junk.png").unwrap_err();
        assert!(matches!(err, AssetError::Image(_)));
    }

    #[test]
    fn placeholder_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = AssetDir::new(dir.path());
        let texture = Fallback::new(source).load_texture("missing.png").unwrap();
        assert_eq!(texture, TextureImage::checkerboard(256, 32));
    }

    #[test]
    fn fallback_passes_through_success() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]))
            .save(dir.path().join("blue.png"))
            .unwrap();
        let texture = Fallback::new(AssetDir::new(dir.path()))
            .load_texture("blue.png")
            .unwrap();
        assert_eq!(texture.width(), 2);
    }

    #[test]
    fn checkerboard_source_ignores_id() {
        let source = Checkerboard { size: 16, cell: 4 };
        let a = source.load_texture("a").unwrap();
        let b = source.load_texture("b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.width(), 16);
    }
}
