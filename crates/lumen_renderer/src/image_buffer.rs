//! Render output buffer and BMP export.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use lumen_core::Color;
use thiserror::Error;

/// Errors raised while exporting an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Buffer of {len} bytes does not match a {width}x{height} RGB image")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

/// 8-bit RGB pixel, laid out for direct byte casting.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Quantize a color already in `[0, 1]`. Out-of-range channels are clamped.
    #[inline]
    pub fn from_color(color: Color) -> Self {
        let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
        Self {
            r: c.x as u8,
            g: c.y as u8,
            b: c.z as u8,
        }
    }

    /// Packed `0x00RRGGBB`.
    #[inline]
    pub fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Row-major image of linear colors.
#[derive(Clone, Debug)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Change the size, clearing to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Color::ZERO);
    }

    pub fn to_rgb8(&self) -> Vec<Rgb8> {
        self.pixels.iter().map(|&c| Rgb8::from_color(c)).collect()
    }

    /// Tightly packed RGB bytes, row-major, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_rgb8()).to_vec()
    }

    /// Pixels as packed `0x00RRGGBB`, the layout of a typical window surface.
    pub fn to_packed_rgb(&self) -> Vec<u32> {
        self.pixels.iter().map(|&c| Rgb8::from_color(c).packed()).collect()
    }

    /// Write an uncompressed 24-bit BMP.
    pub fn save_bmp<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let bytes = self.to_rgb_bytes();
        let len = bytes.len();
        let image = image::RgbImage::from_raw(self.width, self.height, bytes).ok_or(ImageError::SizeMismatch {
            width: self.width,
            height: self.height,
            len,
        })?;

        image.save_with_format(path.as_ref(), image::ImageFormat::Bmp)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}
