//! End-to-end tests for the slice service.
//!
//! A stub fetcher serves an in-memory PNG so the full path
//! (validate → fetch → decode → partition → encode → upload) runs without
//! network access.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use imageslicer::encode::JpegTileEncoder;
use imageslicer::export::{ExportConfig, ExportError, TileExporter, TileFailure};
use imageslicer::grid::{GridError, GridSpec};
use imageslicer::service::{SliceError, SliceRequest, SliceService};
use imageslicer::source::{FetchError, Fetcher, ImageDecoder};
use imageslicer::storage::{DirectorySink, MemorySink, SinkError, StorageSink};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Serves the same PNG for every URL.
struct PngFetcher {
    bytes: Vec<u8>,
}

impl PngFetcher {
    /// Image whose pixel at (x, y) encodes its own coordinates.
    fn new(width: u32, height: u32) -> Self {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10 % 256) as u8, (y * 10 % 256) as u8, 128, 255])
        });
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        Self { bytes }
    }
}

impl Fetcher for PngFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(self.bytes.clone())
    }
}

/// Memory sink that rejects one tile name.
struct RejectingSink {
    inner: MemorySink,
    reject_suffix: String,
    attempts: AtomicUsize,
}

impl RejectingSink {
    fn rejecting_index(index: usize) -> Self {
        Self {
            inner: MemorySink::new(),
            reject_suffix: format!("_{}.jpg", index),
            attempts: AtomicUsize::new(0),
        }
    }
}

impl StorageSink for RejectingSink {
    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if name.ends_with(&self.reject_suffix) {
            // Let earlier concurrent uploads land first
            tokio::time::sleep(Duration::from_millis(20)).await;
            return Err(SinkError::Status {
                name: name.to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.inner.put(name, bytes, content_type).await
    }

    fn describe(&self) -> String {
        "rejecting".to_string()
    }
}

fn service_with<S: StorageSink + 'static>(
    width: u32,
    height: u32,
    sink: Arc<S>,
    config: ExportConfig,
) -> SliceService<PngFetcher, ImageDecoder, S, JpegTileEncoder> {
    SliceService::new(
        PngFetcher::new(width, height),
        ImageDecoder,
        TileExporter::new(sink, Arc::new(JpegTileEncoder::default()), config),
        GridSpec::default(),
    )
}

#[tokio::test]
async fn test_slices_into_sixteen_named_tiles() {
    let sink = Arc::new(MemorySink::new());
    let service = service_with(24, 24, Arc::clone(&sink), ExportConfig::default());

    let response = service
        .slice(
            SliceRequest::new("https://cdn.example.com/uploads/abc.png?v=2"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let expected: Vec<String> = (1..=16)
        .map(|i| format!("memory://abc_24x24_{}.jpg", i))
        .collect();
    assert_eq!(response.urls, expected);

    // Every stored tile is a 6x6 JPEG
    for object in sink.objects() {
        assert_eq!(object.content_type, "image/jpeg");
        let tile = image::load_from_memory(&object.bytes).unwrap();
        assert_eq!((tile.width(), tile.height()), (6, 6));
    }
}

#[tokio::test]
async fn test_truncates_and_insets() {
    let sink = Arc::new(MemorySink::new());
    let service = service_with(25, 19, Arc::clone(&sink), ExportConfig::default());

    let response = service
        .slice(
            SliceRequest::new("https://x/photo.png")
                .with_grid_size(2)
                .with_border_inset(2),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // 25x19 truncates to 24x18; tiles 12x9 shrink to 8x5
    assert_eq!(response.urls.len(), 4);
    assert_eq!(response.urls[0], "memory://photo_24x18_1.jpg");
    let tile = image::load_from_memory(&sink.get("photo_24x18_4.jpg").unwrap().bytes).unwrap();
    assert_eq!((tile.width(), tile.height()), (8, 5));
}

#[tokio::test]
async fn test_sequential_failure_at_tile_nine() {
    let sink = Arc::new(RejectingSink::rejecting_index(9));
    let service = service_with(24, 24, Arc::clone(&sink), ExportConfig::default());

    let err = service
        .slice(SliceRequest::new("https://x/abc.png"), &CancellationToken::new())
        .await
        .unwrap_err();

    match &err {
        SliceError::Export(ExportError::Failed {
            index: 9,
            cause: TileFailure::Sink(SinkError::Status { status: 503, .. }),
        }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_code(), 500);

    // Tiles after the failure are never attempted; earlier ones stay
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 9);
    assert_eq!(sink.inner.len(), 8);
}

#[tokio::test]
async fn test_concurrent_failure_at_tile_nine() {
    let sink = Arc::new(RejectingSink::rejecting_index(9));
    let service = service_with(
        24,
        24,
        Arc::clone(&sink),
        ExportConfig::default().with_max_concurrent_uploads(4),
    );

    let err = service
        .slice(SliceRequest::new("https://x/abc.png"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SliceError::Export(ExportError::Failed { index: 9, .. })
    ));
    assert!(sink.inner.get("abc_24x24_9.jpg").is_none());
}

#[tokio::test]
async fn test_concurrent_success_is_row_major() {
    let sink = Arc::new(MemorySink::new());
    let service = service_with(
        30,
        30,
        Arc::clone(&sink),
        ExportConfig::default().with_max_concurrent_uploads(8),
    );

    let response = service
        .slice(
            SliceRequest::new("https://x/abc.png").with_grid_size(5),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let expected: Vec<String> = (1..=25)
        .map(|i| format!("memory://abc_30x30_{}.jpg", i))
        .collect();
    assert_eq!(response.urls, expected);
    assert_eq!(sink.len(), 25);
}

#[tokio::test]
async fn test_missing_url_is_rejected() {
    let sink = Arc::new(MemorySink::new());
    let service = service_with(24, 24, Arc::clone(&sink), ExportConfig::default());

    let request: SliceRequest = serde_json::from_str(r#"{"gridSize": 4}"#).unwrap();
    let err = service
        .slice(request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, SliceError::MissingParameter("imageUrl"));
    assert_eq!(err.status_code(), 400);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_image_smaller_than_grid() {
    let sink = Arc::new(MemorySink::new());
    let service = service_with(3, 10, Arc::clone(&sink), ExportConfig::default());

    let err = service
        .slice(SliceRequest::new("https://x/tiny.png"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SliceError::Grid(GridError::DimensionTooSmall { .. })
    ));
    assert_eq!(err.status_code(), 400);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_directory_sink_end_to_end() {
    let temp = TempDir::new().unwrap();
    let sink = Arc::new(DirectorySink::new(temp.path()).unwrap());
    let service = service_with(24, 24, sink, ExportConfig::default());

    let response = service
        .slice(SliceRequest::new("https://x/abc.png"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.urls.len(), 16);
    assert!(response.urls[0].starts_with("file://"));
    assert!(response.urls[0].ends_with("/abc_24x24_1.jpg"));
    for i in 1..=16 {
        assert!(temp.path().join(format!("abc_24x24_{}.jpg", i)).exists());
    }
}

#[tokio::test]
async fn test_repeat_slice_overwrites() {
    let sink = Arc::new(MemorySink::new());
    let service = service_with(24, 24, Arc::clone(&sink), ExportConfig::default());
    let request = SliceRequest::new("https://x/abc.png");

    let first = service
        .slice(request.clone(), &CancellationToken::new())
        .await
        .unwrap();
    let second = service
        .slice(request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(sink.len(), 16);
}
