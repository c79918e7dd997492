//! Tile encoding.
//!
//! Tiles are encoded into a lossy raster format before they are handed to a
//! storage sink. The format is fixed per exporter, never chosen per tile.
//!
//! # Example
//!
//! ```
//! use imageslicer::encode::{JpegTileEncoder, TileEncoder};
//! use image::RgbaImage;
//!
//! let encoder = JpegTileEncoder::new(90);
//! let bytes = encoder.encode(&RgbaImage::new(8, 8)).unwrap();
//!
//! assert_eq!(encoder.extension(), "jpg");
//! assert_eq!(encoder.content_type(), "image/jpeg");
//! assert!(bytes.starts_with(&[0xFF, 0xD8]));
//! ```

mod encoder;
mod jpeg;

pub use encoder::{EncodeError, TileEncoder};
pub use jpeg::{JpegTileEncoder, DEFAULT_JPEG_QUALITY};
