//! Decoded source image.

use crate::grid::TileRect;
use image::imageops;
use image::RgbaImage;

/// Immutable decoded source image.
///
/// Region extraction always returns an owned copy; tiles never alias the
/// source buffer.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wrap an RGBA buffer.
    ///
    /// Returns `None` if either dimension is zero.
    pub fn new(pixels: RgbaImage) -> Option<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return None;
        }
        Some(Self { pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the underlying pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copy the pixels inside `rect` into a new image.
    ///
    /// The rectangle is clamped to the image bounds by the underlying crop.
    pub fn extract(&self, rect: &TileRect) -> RgbaImage {
        imageops::crop_imm(&self.pixels, rect.left, rect.top, rect.width(), rect.height())
            .to_image()
    }
}
