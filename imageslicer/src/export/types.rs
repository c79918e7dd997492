//! Export job and result types.

use crate::grid::GridSpec;
use crate::source::SourceImage;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Default number of tiles processed at once (sequential).
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: usize = 1;

/// Default per-tile sink timeout in seconds.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Exporter tuning.
///
/// # Example
///
/// ```
/// use imageslicer::export::ExportConfig;
/// use std::time::Duration;
///
/// let config = ExportConfig::new()
///     .with_max_concurrent_uploads(8)
///     .with_upload_timeout(Duration::from_secs(10));
/// assert!(!config.is_sequential());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportConfig {
    max_concurrent_uploads: usize,
    upload_timeout: Duration,
}

impl ExportConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum tiles in flight. `1` processes tiles strictly one after
    /// another; `0` is treated as `1`.
    pub fn with_max_concurrent_uploads(mut self, max: usize) -> Self {
        self.max_concurrent_uploads = max.max(1);
        self
    }

    /// Upper bound on a single sink call.
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn max_concurrent_uploads(&self) -> usize {
        self.max_concurrent_uploads
    }

    pub fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    /// True when tiles are processed one at a time.
    pub fn is_sequential(&self) -> bool {
        self.max_concurrent_uploads <= 1
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_concurrent_uploads: DEFAULT_MAX_CONCURRENT_UPLOADS,
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }
}

/// Everything one export needs; lives for a single export call.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Prefix for tile names
    pub identifier: String,
    pub grid: GridSpec,
    pub image: Arc<SourceImage>,
}

impl ExportJob {
    pub fn new(identifier: impl Into<String>, grid: GridSpec, image: Arc<SourceImage>) -> Self {
        Self {
            identifier: identifier.into(),
            grid,
            image,
        }
    }
}

/// One exported tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileResult {
    pub row: u32,
    pub col: u32,
    /// 1-based row-major position
    pub index: usize,
    /// Object name handed to the sink
    pub name: String,
    /// URL returned by the sink
    pub url: String,
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub usable_width: u32,
    pub usable_height: u32,
    /// Tiles in row-major order
    pub tiles: Vec<TileResult>,
}

impl ExportReport {
    /// Tile URLs in row-major order.
    pub fn urls(&self) -> Vec<String> {
        self.tiles.iter().map(|t| t.url.clone()).collect()
    }
}
