use anyhow::Result;
use image::RgbaImage;

/// Owned RGBA8 frame. Each pipeline stage either passes a buffer through
/// untouched or allocates a new one; no stage mutates a buffer it received.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    raw_data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl PixelBuffer {
    pub fn build_from_raw_data(width_pixels: u32, height_pixels: u32, raw_rgba_data: Vec<u8>) -> Self {
        debug_assert_eq!(
            raw_rgba_data.len(),
            (width_pixels as usize) * (height_pixels as usize) * 4
        );

        Self {
            width: width_pixels,
            height: height_pixels,
            raw_data: raw_rgba_data,
        }
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let width_pixels = image.width();
        let height_pixels = image.height();
        Self::build_from_raw_data(width_pixels, height_pixels, image.into_raw())
    }

    pub fn into_rgba_image(self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.raw_data)
            .ok_or_else(|| anyhow::anyhow!("pixel data does not match buffer dimensions"))
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.raw_data
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 4] {
        let index = ((y * self.width + x) * 4) as usize;
        [
            self.raw_data[index],
            self.raw_data[index + 1],
            self.raw_data[index + 2],
            self.raw_data[index + 3],
        ]
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let index = ((y * self.width + x) * 4) as usize;
        self.raw_data[index..index + 4].copy_from_slice(&rgba);
    }
}
