//! JPEG tile encoder.

use super::encoder::{EncodeError, TileEncoder};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, RgbaImage};

/// Default JPEG quality for web delivery.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encodes tiles as baseline JPEG.
///
/// JPEG carries no alpha channel, so tiles are flattened to RGB before
/// encoding. Quality is clamped to `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegTileEncoder {
    quality: u8,
}

impl JpegTileEncoder {
    /// Create an encoder with the given quality.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Configured quality (1-100).
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegTileEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl TileEncoder for JpegTileEncoder {
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(EncodeError::EmptyImage { width, height });
        }

        let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

        // Rough guess: ~1 byte per pixel at high quality
        let mut buffer = Vec::with_capacity((width as usize) * (height as usize));
        JpegEncoder::new_with_quality(&mut buffer, self.quality)
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| EncodeError::Codec(e.to_string()))?;

        Ok(buffer)
    }

    fn extension(&self) -> &str {
        "jpg"
    }

    fn content_type(&self) -> &str {
        "image/jpeg"
    }

    fn name(&self) -> &str {
        "JPEG"
    }
}
