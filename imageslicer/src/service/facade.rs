//! Slice service facade.

use super::error::{ServiceInitError, SliceError, SourceFailure};
use super::request::{SliceRequest, SliceResponse, ValidatedRequest};
use crate::config::ConfigFile;
use crate::encode::{JpegTileEncoder, TileEncoder};
use crate::export::{ExportError, ExportJob, ExportReport, TileExporter};
use crate::grid::GridSpec;
use crate::source::{
    identifier_from_url, Decoder, Fetcher, ImageDecoder, ReqwestFetcher, SourceImage,
};
use crate::storage::{ConfiguredSink, StorageSink};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Service wired from a [`ConfigFile`]: reqwest download, `image` decode,
/// configured sink, JPEG tiles.
pub type DefaultSliceService =
    SliceService<ReqwestFetcher, ImageDecoder, ConfiguredSink, JpegTileEncoder>;

/// Handles "slice an image" requests end to end.
///
/// A request is validated, the source downloaded and decoded, and the
/// decoded image handed to the [`TileExporter`]. Nothing is fetched or
/// stored for a request that fails validation.
pub struct SliceService<F, D, S, E> {
    fetcher: F,
    decoder: Arc<D>,
    exporter: TileExporter<S, E>,
    defaults: GridSpec,
}

impl DefaultSliceService {
    /// Build the production service from settings.
    pub fn from_config(config: &ConfigFile) -> Result<Self, ServiceInitError> {
        let fetcher = ReqwestFetcher::with_timeout(config.download.timeout_secs)?;
        let sink = config.sink_config()?.create()?;
        let encoder = config.encoding_config().encoder();

        info!(
            sink = %sink.describe(),
            grid_size = config.grid.size,
            border_inset = config.grid.border_inset,
            max_concurrent_uploads = config.export.max_concurrent_uploads,
            "Slice service configured"
        );

        Ok(Self::new(
            fetcher,
            ImageDecoder,
            TileExporter::new(Arc::new(sink), Arc::new(encoder), config.export_config()),
            config.grid_spec(),
        ))
    }
}

impl<F, D, S, E> SliceService<F, D, S, E>
where
    F: Fetcher,
    D: Decoder + 'static,
    S: StorageSink + 'static,
    E: TileEncoder + 'static,
{
    /// Create a service from its parts.
    ///
    /// `defaults` supplies the grid size and border inset for requests
    /// that omit them.
    pub fn new(fetcher: F, decoder: D, exporter: TileExporter<S, E>, defaults: GridSpec) -> Self {
        Self {
            fetcher,
            decoder: Arc::new(decoder),
            exporter,
            defaults,
        }
    }

    /// Grid settings applied to requests that omit them.
    pub fn defaults(&self) -> GridSpec {
        self.defaults
    }

    pub fn exporter(&self) -> &TileExporter<S, E> {
        &self.exporter
    }

    /// Slice the image named by `request` and return the tile URLs.
    pub async fn slice(
        &self,
        request: SliceRequest,
        cancellation: &CancellationToken,
    ) -> Result<SliceResponse, SliceError> {
        let report = self.slice_with_report(request, cancellation).await?;
        Ok(SliceResponse::success(report.urls()))
    }

    /// Like [`slice`](Self::slice) but returns per-tile detail.
    #[instrument(skip_all, fields(image_url = tracing::field::Empty))]
    pub async fn slice_with_report(
        &self,
        request: SliceRequest,
        cancellation: &CancellationToken,
    ) -> Result<ExportReport, SliceError> {
        let ValidatedRequest { image_url, grid } = request.validate(self.defaults)?;
        tracing::Span::current().record("image_url", image_url.as_str());

        let image = self.load_source(&image_url, cancellation).await?;
        let identifier = identifier_from_url(&image_url);

        info!(
            identifier = %identifier,
            width = image.width(),
            height = image.height(),
            grid_size = grid.grid_size(),
            border_inset = grid.border_inset(),
            "Source image loaded"
        );

        let job = ExportJob::new(identifier, grid, Arc::new(image));
        let report = self.exporter.export(&job, cancellation).await?;
        Ok(report)
    }

    /// Download and decode the source image.
    async fn load_source(
        &self,
        image_url: &str,
        cancellation: &CancellationToken,
    ) -> Result<SourceImage, SliceError> {
        let bytes = tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                return Err(ExportError::Cancelled { index: 1 }.into());
            }
            fetched = self.fetcher.fetch(image_url) => fetched.map_err(|e| {
                warn!(error = %e, "Source download failed");
                SliceError::SourceFetch(SourceFailure::Fetch(e))
            })?,
        };

        let decoder = Arc::clone(&self.decoder);
        tokio::task::spawn_blocking(move || decoder.decode(&bytes))
            .await
            .map_err(|e| SourceFailure::Worker(e.to_string()))?
            .map_err(|e| {
                warn!(error = %e, "Source decode failed");
                SliceError::SourceFetch(SourceFailure::Decode(e))
            })
    }
}
