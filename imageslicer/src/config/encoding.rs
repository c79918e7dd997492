//! Tile encoding configuration.

use crate::encode::{JpegTileEncoder, DEFAULT_JPEG_QUALITY};

/// Configuration for tile encoding.
///
/// # Example
///
/// ```
/// use imageslicer::config::EncodingConfig;
///
/// let config = EncodingConfig::default();
/// assert_eq!(config.quality(), 90);
///
/// let config = EncodingConfig::new(75);
/// assert_eq!(config.encoder().quality(), 75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingConfig {
    /// JPEG quality (1-100)
    quality: u8,
}

impl EncodingConfig {
    /// Create a configuration with the given JPEG quality, clamped to 1-100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Get the JPEG quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Build the tile encoder.
    pub fn encoder(&self) -> JpegTileEncoder {
        JpegTileEncoder::new(self.quality)
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
