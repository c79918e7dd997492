//! Tile exporter: partition, crop, encode, name, upload.

use super::error::{ExportError, TileFailure};
use super::naming::tile_name;
use super::types::{ExportConfig, ExportJob, ExportReport, TileResult};
use crate::encode::TileEncoder;
use crate::grid::{apply_inset, compute_tiles, TileRect};
use crate::source::SourceImage;
use crate::storage::{SinkError, StorageSink};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// A tile ready to be rendered and uploaded.
#[derive(Debug, Clone)]
struct TilePlan {
    index: usize,
    /// Region to extract, inset already applied
    rect: TileRect,
    name: String,
}

/// Why a tile stopped.
#[derive(Debug)]
enum Abort {
    Failed(TileFailure),
    Cancelled,
}

impl Abort {
    fn into_export_error(self, index: usize) -> ExportError {
        match self {
            Abort::Failed(cause) => ExportError::Failed { index, cause },
            Abort::Cancelled => ExportError::Cancelled { index },
        }
    }
}

/// Drives a full export of one image.
///
/// Tiles are rendered from a shared read-only [`SourceImage`] and handed to
/// the sink one by one (sequential mode) or with bounded concurrency. In
/// both modes the returned tiles are in row-major order and the first tile
/// failure fails the whole export.
pub struct TileExporter<S, E> {
    sink: Arc<S>,
    encoder: Arc<E>,
    config: ExportConfig,
}

impl<S, E> TileExporter<S, E>
where
    S: StorageSink + 'static,
    E: TileEncoder + 'static,
{
    /// Create an exporter writing to `sink` with `encoder`.
    pub fn new(sink: Arc<S>, encoder: Arc<E>, config: ExportConfig) -> Self {
        Self {
            sink,
            encoder,
            config,
        }
    }

    /// Exporter configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The sink tiles are written to.
    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Export every tile of `job`.
    ///
    /// The grid is computed before any tile work, so dimension errors have
    /// no side effects. When `cancellation` fires, no further sink calls are
    /// started and the export fails with [`ExportError::Cancelled`].
    #[instrument(
        skip(self, job, cancellation),
        fields(identifier = %job.identifier, grid_size = job.grid.grid_size())
    )]
    pub async fn export(
        &self,
        job: &ExportJob,
        cancellation: &CancellationToken,
    ) -> Result<ExportReport, ExportError> {
        let layout = compute_tiles(job.image.width(), job.image.height(), job.grid.grid_size())?;
        let inset = job.grid.border_inset();
        let extension = self.encoder.extension();

        let plans: Vec<TilePlan> = layout
            .tiles
            .iter()
            .map(|tile| {
                let index = tile.index(layout.grid_size);
                TilePlan {
                    index,
                    rect: apply_inset(*tile, inset),
                    name: tile_name(
                        &job.identifier,
                        layout.usable_width,
                        layout.usable_height,
                        index,
                        extension,
                    ),
                }
            })
            .collect();

        info!(
            source_width = job.image.width(),
            source_height = job.image.height(),
            usable_width = layout.usable_width,
            usable_height = layout.usable_height,
            tile_width = layout.tile_width,
            tile_height = layout.tile_height,
            border_inset = inset,
            tiles = plans.len(),
            sink = %self.sink.describe(),
            concurrency = self.config.max_concurrent_uploads(),
            "Starting export"
        );

        let tiles = if self.config.is_sequential() {
            self.export_sequential(&job.image, plans, cancellation)
                .await?
        } else {
            self.export_concurrent(&job.image, plans, cancellation)
                .await?
        };

        info!(tiles = tiles.len(), "Export complete");

        Ok(ExportReport {
            usable_width: layout.usable_width,
            usable_height: layout.usable_height,
            tiles,
        })
    }

    async fn export_sequential(
        &self,
        image: &Arc<SourceImage>,
        plans: Vec<TilePlan>,
        cancellation: &CancellationToken,
    ) -> Result<Vec<TileResult>, ExportError> {
        let mut results = Vec::with_capacity(plans.len());

        for plan in plans {
            let index = plan.index;
            let result = process_tile(
                Arc::clone(image),
                Arc::clone(&self.encoder),
                Arc::clone(&self.sink),
                plan,
                self.config.upload_timeout(),
                cancellation.clone(),
            )
            .await
            .map_err(|abort| log_abort(abort, index))?;

            results.push(result);
        }

        Ok(results)
    }

    async fn export_concurrent(
        &self,
        image: &Arc<SourceImage>,
        plans: Vec<TilePlan>,
        cancellation: &CancellationToken,
    ) -> Result<Vec<TileResult>, ExportError> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_uploads()));
        let mut slots: Vec<Option<TileResult>> = vec![None; plans.len()];
        let mut tasks = JoinSet::new();

        for plan in plans {
            let index = plan.index;
            let image = Arc::clone(image);
            let encoder = Arc::clone(&self.encoder);
            let sink = Arc::clone(&self.sink);
            let semaphore = Arc::clone(&semaphore);
            let cancellation = cancellation.clone();
            let timeout = self.config.upload_timeout();

            tasks.spawn(async move {
                let work = async move {
                    let _permit = tokio::select! {
                        biased;
                        _ = cancellation.cancelled() => return Err(Abort::Cancelled),
                        permit = semaphore.acquire_owned() => permit
                            .map_err(|e| Abort::Failed(TileFailure::Worker(e.to_string())))?,
                    };
                    process_tile(image, encoder, sink, plan, timeout, cancellation).await
                };

                let outcome = match AssertUnwindSafe(work).catch_unwind().await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(Abort::Failed(TileFailure::Worker(
                        "tile task panicked".to_string(),
                    ))),
                };
                (index, outcome)
            });
        }

        let mut first_error: Option<ExportError> = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(result))) => {
                    slots[index - 1] = Some(result);
                }
                Ok((index, Err(abort))) => {
                    if first_error.is_none() {
                        first_error = Some(log_abort(abort, index));
                        // Nothing after the first failure can change the outcome
                        tasks.abort_all();
                    }
                }
                Err(join_err) => {
                    // Tasks aborted above; panics are caught inside the task
                    debug!(error = %join_err, "Tile task ended without a result");
                }
            }
        }

        if let Some(err) = first_error {
            return Err(match err {
                // Report the lowest tile without a result, not the first task to notice
                ExportError::Cancelled { .. } => ExportError::Cancelled {
                    index: first_incomplete(&slots),
                },
                other => other,
            });
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(position, slot)| {
                slot.ok_or(ExportError::Failed {
                    index: position + 1,
                    cause: TileFailure::Worker("tile produced no result".to_string()),
                })
            })
            .collect()
    }
}

/// 1-based index of the first tile without a result.
fn first_incomplete(slots: &[Option<TileResult>]) -> usize {
    slots
        .iter()
        .position(Option::is_none)
        .unwrap_or(slots.len())
        + 1
}

fn log_abort(abort: Abort, index: usize) -> ExportError {
    let err = abort.into_export_error(index);
    warn!(index, error = %err, "Tile export stopped");
    err
}

/// Render, encode, and upload one tile.
async fn process_tile<S, E>(
    image: Arc<SourceImage>,
    encoder: Arc<E>,
    sink: Arc<S>,
    plan: TilePlan,
    upload_timeout: Duration,
    cancellation: CancellationToken,
) -> Result<TileResult, Abort>
where
    S: StorageSink + 'static,
    E: TileEncoder + 'static,
{
    if cancellation.is_cancelled() {
        return Err(Abort::Cancelled);
    }

    let rect = plan.rect;
    let render_encoder = Arc::clone(&encoder);
    let bytes = tokio::task::spawn_blocking(move || {
        let tile = image.extract(&rect);
        render_encoder.encode(&tile)
    })
    .await
    .map_err(|e| Abort::Failed(TileFailure::Worker(e.to_string())))?
    .map_err(|e| Abort::Failed(TileFailure::Encode(e)))?;

    debug!(
        index = plan.index,
        name = %plan.name,
        width = rect.width(),
        height = rect.height(),
        bytes = bytes.len(),
        "Tile encoded"
    );

    // Cancellation may have fired while encoding
    if cancellation.is_cancelled() {
        return Err(Abort::Cancelled);
    }

    let upload = tokio::time::timeout(
        upload_timeout,
        sink.put(&plan.name, bytes, encoder.content_type()),
    );

    let url = tokio::select! {
        biased;
        _ = cancellation.cancelled() => return Err(Abort::Cancelled),
        outcome = upload => match outcome {
            Ok(Ok(url)) => url,
            Ok(Err(e)) => return Err(Abort::Failed(TileFailure::Sink(e))),
            Err(_) => {
                return Err(Abort::Failed(TileFailure::Sink(SinkError::Timeout {
                    name: plan.name.clone(),
                    secs: upload_timeout.as_secs(),
                })))
            }
        },
    };

    debug!(index = plan.index, url = %url, "Tile stored");

    Ok(TileResult {
        row: rect.row,
        col: rect.col,
        index: plan.index,
        name: plan.name,
        url,
    })
}
