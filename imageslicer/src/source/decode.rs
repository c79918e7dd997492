//! Source image decoding.

use super::buffer::SourceImage;
use thiserror::Error;

/// Errors that can occur while decoding a source image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Bytes are not a supported image format or are corrupt
    #[error("Failed to decode image: {0}")]
    Malformed(String),

    /// Image decoded but has no pixels
    #[error("Decoded image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Trait for turning raw bytes into a [`SourceImage`].
pub trait Decoder: Send + Sync {
    /// Decode `bytes` into an RGBA source image.
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError>;
}

/// Decoder backed by the `image` crate; the format is guessed from content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl Decoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());

        SourceImage::new(decoded.into_rgba8()).ok_or(DecodeError::Empty { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255]));
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decodes_png() {
        let source = ImageDecoder.decode(&png_bytes(9, 4)).unwrap();
        assert_eq!(source.width(), 9);
        assert_eq!(source.height(), 4);
        assert_eq!(source.pixels().get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let result = ImageDecoder.decode(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(
            ImageDecoder.decode(&[]),
            Err(DecodeError::Malformed(_))
        ));
    }
}
