//! TileEncoder trait for abstracting tile output formats.

use image::RgbaImage;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while encoding a tile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Tile has a zero dimension
    #[error("Cannot encode empty tile ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Underlying codec failure
    #[error("Encoding failed: {0}")]
    Codec(String),
}

/// Trait for tile encoding strategies.
///
/// Implementations must be thread-safe (`Send + Sync`) so one encoder can be
/// shared by concurrent tile workers.
///
/// # Implementors
///
/// - [`JpegTileEncoder`](super::JpegTileEncoder) - Baseline JPEG at a fixed quality
pub trait TileEncoder: Send + Sync {
    /// Encode an RGBA tile into a complete file buffer.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if the image is empty or the codec fails.
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, EncodeError>;

    /// File extension without the leading dot (e.g., "jpg").
    fn extension(&self) -> &str;

    /// MIME type passed to storage sinks (e.g., "image/jpeg").
    fn content_type(&self) -> &str;

    /// Human-readable encoder name for logging.
    fn name(&self) -> &str;
}

/// Blanket implementation for Arc-wrapped encoders.
impl<T: TileEncoder + ?Sized> TileEncoder for Arc<T> {
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image)
    }

    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn content_type(&self) -> &str {
        (**self).content_type()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
