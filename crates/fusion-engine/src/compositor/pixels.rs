pub use image::RgbaImage;

use crate::error::FusionError;

/// Wrap decoded RGBA8 rows (top to bottom) from the host.
pub fn rgba_from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbaImage, FusionError> {
    let actual = pixels.len();
    RgbaImage::from_raw(width, height, pixels).ok_or(FusionError::ImageSize {
        width,
        height,
        expected: width as usize * height as usize * 4,
        actual,
    })
}

/// A 0×0 image, standing in for one that failed to load.
pub fn blank() -> RgbaImage {
    RgbaImage::new(0, 0)
}

pub fn is_blank(image: &RgbaImage) -> bool {
    image.width() == 0 || image.height() == 0
}

/// Natural width over height. A zero height divides by one instead.
pub fn aspect_ratio(image: &RgbaImage) -> f32 {
    image.width() as f32 / image.height().max(1) as f32
}
