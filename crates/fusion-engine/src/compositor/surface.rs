use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba};

use super::pixels::{is_blank, RgbaImage};
use crate::error::FusionError;

/// Largest surface edge in pixels. Wider images are squeezed into it.
pub const MAX_SURFACE_DIMENSION: u32 = 8192;

/// What a zero-sized canvas exports as.
pub const EMPTY_DATA_URL: &str = "data:,";

/// Surface size for an image of `width`×`height` drawn at a fixed `baseline` height.
/// Returns `(surface_width, surface_height, aspect_ratio)`; both edges are capped
/// at `MAX_SURFACE_DIMENSION`, the ratio is not.
pub fn fit_to_baseline(width: u32, height: u32, baseline: u32) -> (u32, u32, f32) {
    let ratio = width as f32 / height.max(1) as f32;
    let baseline = baseline.min(MAX_SURFACE_DIMENSION);
    let surface_width = (baseline as f32 * ratio)
        .round()
        .min(MAX_SURFACE_DIMENSION as f32) as u32;
    (surface_width, baseline, ratio)
}

/// RGBA8 drawing surface (the merge canvas).
#[derive(Debug, Clone)]
pub struct Surface {
    canvas: RgbaImage,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(
                width.min(MAX_SURFACE_DIMENSION),
                height.min(MAX_SURFACE_DIMENSION),
            ),
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// RGBA8 rows, top to bottom.
    pub fn pixels(&self) -> &[u8] {
        self.canvas.as_raw()
    }

    /// Resize, discarding the contents (a canvas resize clears it too).
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Fill with transparent black.
    pub fn clear(&mut self) {
        self.canvas.pixels_mut().for_each(|px| *px = Rgba([0; 4]));
    }

    /// Resize to `image`'s aspect ratio at `baseline` height. Returns the ratio.
    pub fn fit_image(&mut self, image: &RgbaImage, baseline: u32) -> f32 {
        let (w, h, ratio) = fit_to_baseline(image.width(), image.height(), baseline);
        self.resize(w, h);
        ratio
    }

    /// Scale the whole image onto the whole surface (bilinear, no cropping).
    pub fn draw_full(&mut self, image: &RgbaImage) {
        if is_blank(image) || self.width() == 0 || self.height() == 0 {
            return;
        }
        self.canvas = imageops::resize(image, self.width(), self.height(), FilterType::Triangle);
    }

    /// Encode the current contents as an embeddable PNG `data:` URL.
    pub fn export_data_url(&self) -> Result<String, FusionError> {
        if self.width() == 0 || self.height() == 0 {
            return Ok(EMPTY_DATA_URL.to_string());
        }
        let mut png = Cursor::new(Vec::new());
        self.canvas.write_to(&mut png, ImageFormat::Png)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png.into_inner())))
    }
}
