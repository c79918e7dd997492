//! Tile export.
//!
//! Turns a decoded image into stored tiles:
//!
//! ```text
//! SourceImage ──► compute_tiles ──► apply_inset ──► extract ──► encode ──► sink.put
//!                  (row-major)       (per tile)     (owned)     (JPEG)     (URL)
//! ```
//!
//! Tile `index` is `row * grid_size + col + 1` everywhere: in object names,
//! in [`TileResult::index`], and in [`ExportError`] positions.
//!
//! # Example
//!
//! ```
//! use imageslicer::encode::JpegTileEncoder;
//! use imageslicer::export::{ExportConfig, ExportJob, TileExporter};
//! use imageslicer::grid::GridSpec;
//! use imageslicer::source::SourceImage;
//! use imageslicer::storage::MemorySink;
//! use image::RgbaImage;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let image = Arc::new(SourceImage::new(RgbaImage::new(24, 24)).unwrap());
//! let exporter = TileExporter::new(
//!     Arc::new(MemorySink::new()),
//!     Arc::new(JpegTileEncoder::default()),
//!     ExportConfig::default(),
//! );
//!
//! let job = ExportJob::new("abc", GridSpec::new(4), image);
//! let report = exporter.export(&job, &CancellationToken::new()).await.unwrap();
//!
//! assert_eq!(report.tiles.len(), 16);
//! assert_eq!(report.tiles[0].name, "abc_24x24_1.jpg");
//! # });
//! ```

mod error;
mod exporter;
mod naming;
mod types;


pub use error::{ExportError, TileFailure};
pub use exporter::TileExporter;
pub use naming::tile_name;
pub use types::{
    ExportConfig, ExportJob, ExportReport, TileResult, DEFAULT_MAX_CONCURRENT_UPLOADS,
    DEFAULT_UPLOAD_TIMEOUT_SECS,
};
