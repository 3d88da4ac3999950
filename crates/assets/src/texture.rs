use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// A decoded RGBA8 texture ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    image: RgbaImage,
}

impl TextureImage {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Grey checkerboard with `cell`-pixel squares.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let image = RgbaImage::from_fn(size, size, |x, y| {
            let c = if ((x / cell) ^ (y / cell)) & 1 == 1 { 210 } else { 40 };
            Rgba([c, c, c, 255])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Number of levels in a full mip chain down to 1x1.
    pub fn mip_level_count(&self) -> u32 {
        let largest = self.width().max(self.height()).max(1);
        u32::BITS - largest.leading_zeros()
    }

    /// The base image followed by successive halvings, ending at 1x1.
    pub fn mip_chain(&self) -> Vec<RgbaImage> {
        let mut levels = Vec::with_capacity(self.mip_level_count() as usize);
        levels.push(self.image.clone());

        let (mut width, mut height) = self.image.dimensions();
        while width > 1 || height > 1 {
            width = (width / 2).max(1);
            height = (height / 2).max(1);
            levels.push(imageops::resize(&self.image, width, height, FilterType::Triangle));
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_mip_chain() {
        let tex = TextureImage::checkerboard(256, 16);
        assert_eq!(tex.mip_level_count(), 9);
        let chain = tex.mip_chain();
        assert_eq!(chain.len(), 9);
        assert_eq!(chain[1].dimensions(), (128, 128));
        assert_eq!(chain[8].dimensions(), (1, 1));
    }

    #[test]
    fn odd_mip_chain() {
        let tex = TextureImage::new(RgbaImage::new(5, 3));
        assert_eq!(tex.mip_level_count(), 3);
        let dims: Vec<_> = tex.mip_chain().iter().map(|l| l.dimensions()).collect();
        assert_eq!(dims, vec![(5, 3), (2, 1), (1, 1)]);
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureImage::checkerboard(32, 8);
        let img = tex.image();
        assert_eq!(img.get_pixel(0, 0), &Rgba([40, 40, 40, 255]));
        assert_eq!(img.get_pixel(8, 0), &Rgba([210, 210, 210, 255]));
        assert_eq!(img.get_pixel(8, 8), &Rgba([40, 40, 40, 255]));
    }
}
